//! Per-case entity catalogue
//!
//! Test setup records every document upload, audit action, and note it
//! performs into one of these; the catalogue is the source of truth for
//! what each role is expected to see. Owned by a single test case and
//! discarded at teardown, so parallel workers cannot cross-contaminate.

use tracing::warn;

use crate::types::{Document, Note, RocaEntry, RoleVisible};

/// Push-only accumulator for one case's expected entities.
#[derive(Debug, Default, Clone)]
pub struct CaseCatalogue {
    documents: Vec<Document>,
    roca: Vec<RocaEntry>,
    notes: Vec<Note>,
}

impl CaseCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_document(&mut self, document: Document) -> &mut Self {
        self.documents.push(document);
        self
    }

    pub fn push_roca(&mut self, entry: RocaEntry) -> &mut Self {
        self.roca.push(entry);
        self
    }

    pub fn push_note(&mut self, note: Note) -> &mut Self {
        self.notes.push(note);
        self
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn roca(&self) -> &[RocaEntry] {
        &self.roca
    }

    /// ROCA entries for one section, catalogue order preserved.
    pub fn roca_for_section(&self, section_index: &str) -> Vec<&RocaEntry> {
        self.roca
            .iter()
            .filter(|e| e.section_index == section_index)
            .collect()
    }

    /// Distinct section indices appearing in the ROCA list, first-seen order.
    pub fn roca_sections(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in &self.roca {
            if !seen.contains(&entry.section_index.as_str()) {
                seen.push(entry.section_index.as_str());
            }
        }
        seen
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.roca.is_empty() && self.notes.is_empty()
    }

    /// Flag catalogue entries that will silently drop out of every
    /// comparison, returning the number of findings.
    ///
    /// Two cases are flagged: entries with no `roles` annotation (the
    /// expectation filter excludes them for every role), and ROCA rows
    /// whose `defendants` is an empty string rather than absent. The
    /// empty-string form shows up when a document is moved between
    /// restricted and unrestricted sections and the defendant scope is
    /// half-cleared; the harness treats that as a data bug to surface,
    /// not a rule to replicate.
    pub fn validate(&self) -> usize {
        let mut findings = 0;

        for doc in &self.documents {
            if doc.visible_roles().is_none() {
                warn!(
                    document = %doc.document_name,
                    section = %doc.section_title,
                    "document has no roles annotation; excluded for every role"
                );
                findings += 1;
            }
        }
        for entry in &self.roca {
            if entry.visible_roles().is_none() {
                warn!(
                    document = %entry.document_name,
                    action = %entry.action,
                    "ROCA entry has no roles annotation; excluded for every role"
                );
                findings += 1;
            }
            if entry.defendants.as_deref() == Some("") {
                warn!(
                    document = %entry.document_name,
                    section = %entry.section_index,
                    "ROCA entry carries an empty defendants value; \
                     expected either a defendant list or no value at all"
                );
                findings += 1;
            }
        }
        for note in &self.notes {
            if note.visible_roles().is_none() {
                warn!(
                    user = %note.note_user,
                    "note has no roles annotation; excluded for every role"
                );
                findings += 1;
            }
        }

        findings
    }
}
