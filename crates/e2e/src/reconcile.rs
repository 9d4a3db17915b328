//! Expected-vs-actual reconciliation
//!
//! Symmetric difference between what a role should see and what the
//! extraction adapter scraped, per entity-kind identity rules:
//! documents match on (section title, name, number), ROCA rows on every
//! data field, notes on (text, user, share). Output is a pair of
//! human-readable issue lists, because a test failure has to explain
//! *which* record diverged, not just how many.

use serde::{Deserialize, Serialize};

use casework_common::types::{Document, Note, RocaEntry};

use crate::error::E2eError;

/// Entity kind with a comparison identity and a report description.
pub trait Reconcilable {
    /// Kind-specific identity equality. Never collapses distinct audit
    /// events and never consults role metadata.
    fn matches(&self, other: &Self) -> bool;

    /// One-line description used in missing/unexpected reports.
    fn describe(&self) -> String;
}

impl Reconcilable for Document {
    fn matches(&self, other: &Self) -> bool {
        self.section_title == other.section_title
            && self.document_name == other.document_name
            && self.document_number == other.document_number
    }

    fn describe(&self) -> String {
        format!(
            "document \"{}\" #{} in section \"{}\"",
            self.document_name, self.document_number, self.section_title
        )
    }
}

impl Reconcilable for RocaEntry {
    // Full-record identity: an audit row is a discrete event. Create and
    // Delete rows for the same document must stay distinct.
    fn matches(&self, other: &Self) -> bool {
        self.section_index == other.section_index
            && self.document_number == other.document_number
            && self.document_name == other.document_name
            && self.action == other.action
            && self.username == other.username
            && self.defendants == other.defendants
    }

    fn describe(&self) -> String {
        let defendants = match &self.defendants {
            Some(d) => format!(", defendants: {d}"),
            None => String::new(),
        };
        format!(
            "ROCA {} of \"{}\" #{} in section {} by {}{}",
            self.action,
            self.document_name,
            self.document_number,
            self.section_index,
            self.username,
            defendants
        )
    }
}

impl Reconcilable for Note {
    // Note keys are UI-assigned and unpredictable, so identity is the
    // (text, user, share) triple.
    fn matches(&self, other: &Self) -> bool {
        self.note_text == other.note_text
            && self.note_user == other.note_user
            && self.note_share == other.note_share
            && self.share_scope == other.share_scope
    }

    fn describe(&self) -> String {
        format!(
            "{} by {}: \"{}\"",
            self.share_label(),
            self.note_user,
            self.note_text
        )
    }
}

/// Result of one expected-vs-actual comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Expected records with no counterpart in the live UI.
    pub missing: Vec<String>,
    /// Live records no expectation accounts for.
    pub unexpected: Vec<String>,
}

impl Reconciliation {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }

    /// Combined issue list, missing first, for the aggregator.
    pub fn issues(&self) -> Vec<String> {
        self.missing
            .iter()
            .map(|m| format!("missing: {m}"))
            .chain(self.unexpected.iter().map(|u| format!("unexpected: {u}")))
            .collect()
    }

    /// Turn a dirty result into the single error a test throws, with
    /// every discrepancy enumerated under the category label.
    pub fn into_failure(self, category: &str) -> E2eError {
        E2eError::Visibility {
            category: category.to_string(),
            message: self.issues().join("\n"),
        }
    }
}

/// Symmetric-difference comparison.
///
/// Deliberately the O(|expected| x |actual|) double scan: catalogue
/// sizes are test-scale, and the scan keeps multiset semantics obvious.
/// A duplicate on either side with no counterpart at all produces its
/// own line; duplicates are never deduplicated. Empty output iff the two
/// inputs are set-equal under the kind's identity. Pure computation: no
/// retries, no I/O.
pub fn reconcile<T: Reconcilable>(expected: &[T], actual: &[T]) -> Reconciliation {
    let missing = expected
        .iter()
        .filter(|e| !actual.iter().any(|a| e.matches(a)))
        .map(|e| e.describe())
        .collect();

    let unexpected = actual
        .iter()
        .filter(|a| !expected.iter().any(|e| e.matches(a)))
        .map(|a| a.describe())
        .collect();

    Reconciliation { missing, unexpected }
}
