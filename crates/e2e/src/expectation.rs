//! Role-based expectation filter
//!
//! Given a role and the case catalogue, selects the subset of entities
//! that role is entitled to see. Records with no `roles` annotation are
//! excluded for every role: visibility fails closed.

use casework_common::types::{Role, RoleVisible};

/// Select the catalogue subset visible to `role`, preserving catalogue
/// order. Pure function; an empty result is a valid expectation, not an
/// error.
pub fn expected_for_role<T: RoleVisible>(role: Role, catalogue: &[T]) -> Vec<&T> {
    catalogue.iter().filter(|e| e.visible_to(role)).collect()
}

/// Owned variant for call sites that go on to reconcile against scraped
/// data and want matching slice types.
pub fn expected_for_role_owned<T: RoleVisible + Clone>(role: Role, catalogue: &[T]) -> Vec<T> {
    catalogue
        .iter()
        .filter(|e| e.visible_to(role))
        .cloned()
        .collect()
}
