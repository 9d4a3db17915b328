//! Per-role visibility verification
//!
//! Ties the engine together for one (role, case) pair: filter the
//! catalogue down to what the role should see, pull the live snapshot
//! through the extraction adapter, reconcile, and record the outcome.
//! Extraction failures propagate as hard errors; reconciliation
//! mismatches are data until every category has been checked, then
//! surface as one error enumerating each discrepancy. Mismatches are
//! never retried.

use tracing::{debug, info};

use casework_common::catalogue::CaseCatalogue;
use casework_common::types::Role;

use crate::aggregate::Aggregator;
use crate::error::{E2eError, E2eResult};
use crate::expectation::expected_for_role_owned;
use crate::extract::Extractor;
use crate::reconcile::{reconcile, Reconciliation};

/// Run every visibility category for one role and record the outcomes.
///
/// All categories run even when an early one is dirty; the combined
/// failure is returned only at the end, so a report always shows the
/// complete discrepancy set in one place.
pub async fn verify_role_visibility(
    role: Role,
    heading: &str,
    catalogue: &CaseCatalogue,
    extractor: &dyn Extractor,
    aggregator: &mut Aggregator,
) -> E2eResult<()> {
    let mut dirty: Vec<(String, Reconciliation)> = Vec::new();

    let documents = {
        let expected = expected_for_role_owned(role, catalogue.documents());
        let actual = extractor.documents().await?;
        reconcile(&expected, &actual)
    };
    record_category(role, heading, "documents", documents, aggregator, &mut dirty);

    // Union of expected and observed sections: a live row in a section
    // no expectation mentions must still be queried and reported.
    let mut sections: Vec<String> = catalogue
        .roca_sections()
        .into_iter()
        .map(String::from)
        .collect();
    for observed in extractor.roca_sections().await? {
        if !sections.contains(&observed) {
            sections.push(observed);
        }
    }

    for section in &sections {
        let expected: Vec<_> = expected_for_role_owned(role, catalogue.roca())
            .into_iter()
            .filter(|e| &e.section_index == section)
            .collect();
        let actual = extractor.roca_entries(section).await?;
        let result = reconcile(&expected, &actual);
        record_category(
            role,
            heading,
            &format!("roca section {section}"),
            result,
            aggregator,
            &mut dirty,
        );
    }

    let notes = {
        let expected = expected_for_role_owned(role, catalogue.notes());
        let actual = extractor.notes().await?;
        reconcile(&expected, &actual)
    };
    record_category(role, heading, "notes", notes, aggregator, &mut dirty);

    if dirty.is_empty() {
        info!(role = role.as_str(), heading, "visibility verified");
        return Ok(());
    }

    let categories: Vec<&str> = dirty.iter().map(|(c, _)| c.as_str()).collect();
    let category = categories.join(", ");
    let message = dirty
        .iter()
        .map(|(c, r)| format!("[{c}]\n{}", r.issues().join("\n")))
        .collect::<Vec<_>>()
        .join("\n");
    Err(E2eError::Visibility { category, message })
}

fn record_category(
    role: Role,
    heading: &str,
    category: &str,
    result: Reconciliation,
    aggregator: &mut Aggregator,
    dirty: &mut Vec<(String, Reconciliation)>,
) {
    let issues = result.issues();
    debug!(
        role = role.as_str(),
        category,
        missing = result.missing.len(),
        unexpected = result.unexpected.len(),
        "category reconciled"
    );
    aggregator.record(role.label(), heading, category, issues);
    if !result.is_clean() {
        dirty.push((category.to_string(), result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::FixedExtractor;
    use casework_common::types::{Document, Note, RocaAction, RocaEntry, ShareType};

    fn catalogue() -> CaseCatalogue {
        let mut catalogue = CaseCatalogue::new();
        catalogue.push_document(
            Document::new("Exhibits", "photo.pdf", "1")
                .with_roles([Role::HmctsAdmin, Role::Judge]),
        );
        catalogue.push_roca(
            RocaEntry::new("1", "1", "photo.pdf", RocaAction::Create, "admin1")
                .with_roles([Role::HmctsAdmin]),
        );
        catalogue.push_note(
            Note::new("adjourned", "clerk1", ShareType::WidelyShared)
                .with_roles([Role::HmctsAdmin, Role::Judge]),
        );
        catalogue
    }

    #[tokio::test]
    async fn clean_run_records_every_category() {
        let catalogue = catalogue();
        let extractor = FixedExtractor::new()
            .with_documents(vec![Document::new("Exhibits", "photo.pdf", "1")])
            .with_roca(vec![RocaEntry::new(
                "1",
                "1",
                "photo.pdf",
                RocaAction::Create,
                "admin1",
            )])
            .with_notes(vec![Note::new("adjourned", "clerk1", ShareType::WidelyShared)]);

        let mut aggregator = Aggregator::new();
        verify_role_visibility(Role::HmctsAdmin, "case TR-1", &catalogue, &extractor, &mut aggregator)
            .await
            .unwrap();

        // documents + one roca section + notes
        assert_eq!(aggregator.records().len(), 3);
        assert!(aggregator.passed());
    }

    #[tokio::test]
    async fn judge_sees_no_roca_rows() {
        // Judge is entitled to the document and the note but not the
        // audit row, so an empty actual ROCA table must be clean.
        let catalogue = catalogue();
        let extractor = FixedExtractor::new()
            .with_documents(vec![Document::new("Exhibits", "photo.pdf", "1")])
            .with_notes(vec![Note::new("adjourned", "clerk1", ShareType::WidelyShared)]);

        let mut aggregator = Aggregator::new();
        verify_role_visibility(Role::Judge, "case TR-1", &catalogue, &extractor, &mut aggregator)
            .await
            .unwrap();
        assert!(aggregator.passed());
    }

    #[tokio::test]
    async fn audit_rows_in_unmentioned_sections_are_unexpected() {
        // The catalogue expects no audit activity at all, so a live row
        // in a section it never mentions is a leak, not a clean run.
        let mut catalogue = CaseCatalogue::new();
        catalogue.push_document(
            Document::new("Exhibits", "photo.pdf", "1").with_roles([Role::HmctsAdmin]),
        );

        let extractor = FixedExtractor::new()
            .with_documents(vec![Document::new("Exhibits", "photo.pdf", "1")])
            .with_roca(vec![RocaEntry::new(
                "9",
                "1",
                "leak.pdf",
                RocaAction::Create,
                "intruder",
            )]);

        let mut aggregator = Aggregator::new();
        let err = verify_role_visibility(
            Role::HmctsAdmin,
            "case TR-1",
            &catalogue,
            &extractor,
            &mut aggregator,
        )
        .await
        .unwrap_err();

        let text = err.to_string();
        assert!(text.contains("roca section 9"));
        assert!(text.contains("unexpected"));
        assert!(text.contains("leak.pdf"));
        assert!(!aggregator.passed());
    }

    #[tokio::test]
    async fn failure_lists_all_dirty_categories() {
        let catalogue = catalogue();
        // live UI shows nothing: documents, roca and notes all dirty
        let extractor = FixedExtractor::new();

        let mut aggregator = Aggregator::new();
        let err = verify_role_visibility(
            Role::HmctsAdmin,
            "case TR-1",
            &catalogue,
            &extractor,
            &mut aggregator,
        )
        .await
        .unwrap_err();

        let text = err.to_string();
        assert!(text.contains("documents"));
        assert!(text.contains("roca section 1"));
        assert!(text.contains("notes"));
        assert!(text.contains("photo.pdf"));
        // every category was still recorded despite the failure
        assert_eq!(aggregator.records().len(), 3);
        assert!(!aggregator.passed());
    }
}
