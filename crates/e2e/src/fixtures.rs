//! Static fixture catalogues
//!
//! Hand-authored YAML files under the fixtures directory describe the
//! note catalogue and the navigation links each role should see. Loaded
//! once at process start and read-only from then on.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use casework_common::types::{Note, Role, RoleVisible, ShareType};

use crate::error::{E2eError, E2eResult};

/// One note fixture entry as authored in YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteFixture {
    pub text: String,
    pub user: String,
    pub share: ShareType,
    #[serde(default)]
    pub scope: Option<String>,
    pub roles: Vec<Role>,
}

impl NoteFixture {
    pub fn to_note(&self) -> Note {
        let mut note = Note::new(&self.text, self.user.clone(), self.share)
            .with_roles(self.roles.iter().copied());
        if let Some(scope) = &self.scope {
            note = note.with_scope(scope.clone());
        }
        note
    }
}

/// A navigation link with its role entitlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationLink {
    pub label: String,
    pub path: String,
    #[serde(default)]
    pub roles: Option<Vec<Role>>,
}

impl RoleVisible for NavigationLink {
    fn visible_roles(&self) -> Option<&[Role]> {
        self.roles.as_deref()
    }
}

/// Top-level fixture document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureSet {
    #[serde(default)]
    pub notes: Vec<NoteFixture>,
    #[serde(default)]
    pub navigation: Vec<NavigationLink>,
}

impl FixtureSet {
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        serde_yaml::from_str(yaml).map_err(E2eError::from)
    }

    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            E2eError::FixtureParse(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    /// Load and merge every `.yaml`/`.yml` file under `dir`, in path
    /// order so runs are deterministic.
    pub fn load_all(dir: &Path) -> E2eResult<Self> {
        let mut paths: Vec<_> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .map(|e| e.into_path())
            .collect();
        paths.sort();

        let mut merged = FixtureSet::default();
        for path in paths {
            let set = Self::from_file(&path)?;
            debug!(
                path = %path.display(),
                notes = set.notes.len(),
                navigation = set.navigation.len(),
                "fixture file loaded"
            );
            merged.notes.extend(set.notes);
            merged.navigation.extend(set.navigation);
        }
        Ok(merged)
    }

    /// Materialize the note fixtures as catalogue entities.
    pub fn expected_notes(&self) -> Vec<Note> {
        self.notes.iter().map(NoteFixture::to_note).collect()
    }
}
