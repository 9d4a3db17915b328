//! Entity models for role-based visibility checks
//!
//! Three entity kinds are scraped from (or expected in) the case UI:
//! documents in case sections, ROCA audit-log rows, and sticky notes.
//! Each carries optional `roles` metadata naming the user categories
//! entitled to see it; live-scraped records never carry roles, so the
//! metadata is excluded from comparison identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// User category with a fixed visibility entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    HmctsAdmin,
    CpsProsecutor,
    DefenceAdvocateA,
    DefenceAdvocateB,
    DefenceAdvocateC,
    CourtClerk,
    Judge,
}

impl Role {
    /// Slug used in file names and environment variables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::HmctsAdmin => "hmcts-admin",
            Role::CpsProsecutor => "cps-prosecutor",
            Role::DefenceAdvocateA => "defence-advocate-a",
            Role::DefenceAdvocateB => "defence-advocate-b",
            Role::DefenceAdvocateC => "defence-advocate-c",
            Role::CourtClerk => "court-clerk",
            Role::Judge => "judge",
        }
    }

    /// Human-readable label as shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Role::HmctsAdmin => "HMCTS Admin",
            Role::CpsProsecutor => "CPS Prosecutor",
            Role::DefenceAdvocateA => "Defence Advocate A",
            Role::DefenceAdvocateB => "Defence Advocate B",
            Role::DefenceAdvocateC => "Defence Advocate C",
            Role::CourtClerk => "Court Clerk",
            Role::Judge => "Judge",
        }
    }

    /// The full role matrix, in the order the suite iterates it.
    pub fn all() -> &'static [Role] {
        &[
            Role::HmctsAdmin,
            Role::CpsProsecutor,
            Role::DefenceAdvocateA,
            Role::DefenceAdvocateB,
            Role::DefenceAdvocateC,
            Role::CourtClerk,
            Role::Judge,
        ]
    }

    /// Single role exercised by smoke-scope runs.
    pub fn representative() -> Role {
        Role::HmctsAdmin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == s || r.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidRole(s.to_string()))
    }
}

/// Entity with optional role-visibility metadata.
///
/// Records without metadata are never matched for any role (fail closed).
pub trait RoleVisible {
    fn visible_roles(&self) -> Option<&[Role]>;

    fn visible_to(&self, role: Role) -> bool {
        self.visible_roles().map_or(false, |rs| rs.contains(&role))
    }
}

/// Normalize a document number for comparison.
///
/// Leading zeros are stripped, a pure-zero number collapses to "0".
/// Idempotent; raw padded values are never compared directly.
pub fn normalize_document_number(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed.trim_start_matches('0');
    if stripped.is_empty() && !trimmed.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// A document uploaded to (or visible in) a case section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub section_title: String,
    /// Opaque section key; unknown for some scraped rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    pub document_name: String,
    /// Always stored normalized.
    pub document_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
}

impl Document {
    pub fn new(
        section_title: impl Into<String>,
        document_name: impl Into<String>,
        document_number: &str,
    ) -> Self {
        Self {
            section_title: section_title.into(),
            section_id: None,
            document_name: document_name.into(),
            document_number: normalize_document_number(document_number),
            roles: None,
        }
    }

    pub fn with_section_id(mut self, section_id: impl Into<String>) -> Self {
        self.section_id = Some(section_id.into());
        self
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }
}

impl RoleVisible for Document {
    fn visible_roles(&self) -> Option<&[Role]> {
        self.roles.as_deref()
    }
}

/// Action recorded in a ROCA (Record of Case Activity) row.
///
/// Open set: the UI is free to grow new action labels, so unknown tags
/// are carried through rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RocaAction {
    Create,
    Update,
    Delete,
    Other(String),
}

impl RocaAction {
    pub fn as_str(&self) -> &str {
        match self {
            RocaAction::Create => "Create",
            RocaAction::Update => "Update",
            RocaAction::Delete => "Delete",
            RocaAction::Other(s) => s,
        }
    }
}

impl From<String> for RocaAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Create" => RocaAction::Create,
            "Update" => RocaAction::Update,
            "Delete" => RocaAction::Delete,
            _ => RocaAction::Other(s),
        }
    }
}

impl From<RocaAction> for String {
    fn from(a: RocaAction) -> String {
        a.as_str().to_string()
    }
}

impl fmt::Display for RocaAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ROCA audit-log row.
///
/// Audit rows are discrete events, not mutable entities: a Create
/// followed by a Delete of the same document is two rows, and comparison
/// identity is the full record. The optional `roles` metadata exists only
/// on expected fixtures and never participates in matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocaEntry {
    pub section_index: String,
    /// Normalized integer-as-string.
    pub document_number: String,
    pub document_name: String,
    pub action: RocaAction,
    pub username: String,
    /// Present only for restricted, defendant-scoped records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defendants: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
}

impl RocaEntry {
    pub fn new(
        section_index: impl Into<String>,
        document_number: &str,
        document_name: impl Into<String>,
        action: RocaAction,
        username: impl Into<String>,
    ) -> Self {
        Self {
            section_index: section_index.into(),
            document_number: normalize_document_number(document_number),
            document_name: document_name.into(),
            action,
            username: username.into(),
            defendants: None,
            roles: None,
        }
    }

    pub fn with_defendants(mut self, defendants: impl Into<String>) -> Self {
        self.defendants = Some(defendants.into());
        self
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }
}

impl RoleVisible for RocaEntry {
    fn visible_roles(&self) -> Option<&[Role]> {
        self.roles.as_deref()
    }
}

/// How widely a note is shared, controlling which roles may view it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareType {
    Private,
    TightlyShared,
    WidelyShared,
}

impl ShareType {
    /// UI label without any scope qualifier.
    pub fn base_label(&self) -> &'static str {
        match self {
            ShareType::Private => "Private Note",
            ShareType::TightlyShared => "Tightly Shared Note",
            ShareType::WidelyShared => "Widely Shared Note",
        }
    }

    /// Parse a UI share label, splitting off a parenthetical scope
    /// qualifier if one is present, e.g.
    /// `"Tightly Shared Note (Defence Advocate A)"`.
    pub fn parse_label(label: &str) -> crate::Result<(ShareType, Option<String>)> {
        let trimmed = label.trim();
        let (base, scope) = match trimmed.find('(') {
            Some(open) if trimmed.ends_with(')') => {
                let scope = trimmed[open + 1..trimmed.len() - 1].trim().to_string();
                (trimmed[..open].trim(), Some(scope))
            }
            _ => (trimmed, None),
        };
        let share = match base {
            "Private Note" => ShareType::Private,
            "Tightly Shared Note" => ShareType::TightlyShared,
            "Widely Shared Note" => ShareType::WidelyShared,
            _ => return Err(Error::InvalidShare(label.to_string())),
        };
        Ok((share, scope))
    }
}

impl fmt::Display for ShareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_label())
    }
}

/// A sticky note attached to a case.
///
/// `note_key` is assigned by the UI and not predictable in advance, so it
/// never participates in comparison identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_key: Option<String>,
    /// Stored trimmed.
    pub note_text: String,
    pub note_user: String,
    pub note_share: ShareType,
    /// Parenthetical scope qualifier from the share label, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
}

impl Note {
    pub fn new(note_text: &str, note_user: impl Into<String>, note_share: ShareType) -> Self {
        Self {
            note_key: None,
            note_text: note_text.trim().to_string(),
            note_user: note_user.into(),
            note_share,
            share_scope: None,
            roles: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.note_key = Some(key.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.share_scope = Some(scope.into());
        self
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }

    /// Full share label as rendered in the UI.
    pub fn share_label(&self) -> String {
        match &self.share_scope {
            Some(scope) => format!("{} ({})", self.note_share.base_label(), scope),
            None => self.note_share.base_label().to_string(),
        }
    }
}

impl RoleVisible for Note {
    fn visible_roles(&self) -> Option<&[Role]> {
        self.roles.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("007", "7")]
    #[test_case("0", "0")]
    #[test_case("000", "0")]
    #[test_case("42", "42")]
    #[test_case("  012 ", "12")]
    #[test_case("0070", "70")]
    fn normalization(raw: &str, expected: &str) {
        assert_eq!(normalize_document_number(raw), expected);
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["007", "0", "9001", "000"] {
            let once = normalize_document_number(raw);
            assert_eq!(normalize_document_number(&once), once);
        }
    }

    #[test]
    fn role_round_trip() {
        for role in Role::all() {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
        assert!("registrar".parse::<Role>().is_err());
    }

    #[test]
    fn role_label_parses_too() {
        assert_eq!("HMCTS Admin".parse::<Role>().unwrap(), Role::HmctsAdmin);
    }

    #[test]
    fn share_label_with_scope() {
        let (share, scope) =
            ShareType::parse_label("Tightly Shared Note (Defence Advocate A)").unwrap();
        assert_eq!(share, ShareType::TightlyShared);
        assert_eq!(scope.as_deref(), Some("Defence Advocate A"));
    }

    #[test]
    fn share_label_plain() {
        let (share, scope) = ShareType::parse_label("Private Note").unwrap();
        assert_eq!(share, ShareType::Private);
        assert!(scope.is_none());
        assert!(ShareType::parse_label("Public Note").is_err());
    }

    #[test]
    fn roca_action_open_set() {
        assert_eq!(RocaAction::from("Create".to_string()), RocaAction::Create);
        assert_eq!(
            RocaAction::from("Reclassify".to_string()),
            RocaAction::Other("Reclassify".to_string())
        );
    }

    #[test]
    fn note_text_is_trimmed() {
        let note = Note::new("  hearing moved  ", "clerk1", ShareType::Private);
        assert_eq!(note.note_text, "hearing moved");
    }

    #[test]
    fn document_number_normalized_on_construction() {
        let doc = Document::new("Exhibits", "photo.pdf", "007");
        assert_eq!(doc.document_number, "7");
    }

    #[test]
    fn visibility_fails_closed_without_roles() {
        let doc = Document::new("Exhibits", "photo.pdf", "1");
        assert!(!doc.visible_to(Role::HmctsAdmin));
        let doc = doc.with_roles([Role::HmctsAdmin]);
        assert!(doc.visible_to(Role::HmctsAdmin));
        assert!(!doc.visible_to(Role::Judge));
    }
}
