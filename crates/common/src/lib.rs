//! Shared types for the casework visibility harness
//!
//! Pure data: entity models scraped from or expected in the case-management
//! UI, the per-case catalogue that test setup accumulates them in, and the
//! document-number normalization every comparison goes through. No async,
//! no I/O.

pub mod catalogue;
pub mod error;
pub mod types;

pub use catalogue::CaseCatalogue;
pub use error::{Error, Result};
pub use types::{normalize_document_number, Document, Note, Role, RoleVisible, RocaAction, RocaEntry, ShareType};
