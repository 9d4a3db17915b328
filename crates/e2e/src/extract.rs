//! Extraction adapter interface
//!
//! The engine never touches a browser. Whatever drives the UI implements
//! [`Extractor`] and hands back entities in catalogue shape. The
//! contract: return a stable, complete snapshot, or fail with a timeout
//! (typically via [`crate::retry::poll_until`]) - never return a partial
//! snapshot silently, and never map a timeout to an empty list, which
//! would mask missing-entity bugs as clean runs.

use async_trait::async_trait;

use casework_common::types::{Document, Note, RocaEntry};

use crate::error::E2eResult;

/// Capability interface over one authenticated view of a case.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Every document currently visible across the case sections.
    async fn documents(&self) -> E2eResult<Vec<Document>>;

    /// Section indices whose audit tables currently show rows.
    ///
    /// Verification reconciles the union of expected and observed
    /// sections, so a live row in a section no expectation mentions
    /// still gets queried and reported.
    async fn roca_sections(&self) -> E2eResult<Vec<String>>;

    /// ROCA rows for one section's audit table.
    async fn roca_entries(&self, section_index: &str) -> E2eResult<Vec<RocaEntry>>;

    /// Sticky notes currently visible on the case.
    async fn notes(&self) -> E2eResult<Vec<Note>>;
}

/// In-memory extractor over fixed snapshots.
///
/// Stands in for the browser layer in engine tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct FixedExtractor {
    documents: Vec<Document>,
    roca: Vec<RocaEntry>,
    notes: Vec<Note>,
}

impl FixedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_roca(mut self, roca: Vec<RocaEntry>) -> Self {
        self.roca = roca;
        self
    }

    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = notes;
        self
    }
}

#[async_trait]
impl Extractor for FixedExtractor {
    async fn documents(&self) -> E2eResult<Vec<Document>> {
        Ok(self.documents.clone())
    }

    async fn roca_sections(&self) -> E2eResult<Vec<String>> {
        let mut sections: Vec<String> = Vec::new();
        for entry in &self.roca {
            if !sections.contains(&entry.section_index) {
                sections.push(entry.section_index.clone());
            }
        }
        Ok(sections)
    }

    async fn roca_entries(&self, section_index: &str) -> E2eResult<Vec<RocaEntry>> {
        Ok(self
            .roca
            .iter()
            .filter(|e| e.section_index == section_index)
            .cloned()
            .collect())
    }

    async fn notes(&self) -> E2eResult<Vec<Note>> {
        Ok(self.notes.clone())
    }
}
