//! Casework visibility verification harness
//!
//! This crate is the reconciliation engine behind the casework E2E suite:
//! it decides, for each user role, which documents / ROCA audit rows /
//! notes that role should be able to see, diffs that against what an
//! extraction adapter scraped from the live UI, and aggregates the
//! resulting issue lists across users and categories into one pass/fail
//! verdict per run.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Visibility Verification (Rust)               │
//! ├──────────────────────────────────────────────────────────────┤
//! │  CaseCatalogue (casework-common)                             │
//! │    └── expected entities pushed by test setup                │
//! │  expectation::expected_for_role(role, catalogue)             │
//! │    └── fail-closed role filter                               │
//! │  Extractor (trait, supplied by the browser layer)            │
//! │    └── documents() / roca_entries(section) / notes()         │
//! │  reconcile::reconcile(expected, actual)                      │
//! │    └── symmetric diff -> { missing, unexpected }             │
//! │  Aggregator                                                  │
//! │    ├── record(user, heading, category, issues)               │
//! │    ├── write_worker_file(dir, index)    (per worker)         │
//! │    └── merge_worker_files(dir)          (global teardown)    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reconciler and aggregator are synchronous and pure; everything
//! flaky (rendering, pagination, spinners) lives behind the [`Extractor`]
//! trait and the bounded [`retry::poll_until`] combinator.

pub mod aggregate;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod expectation;
pub mod extract;
pub mod fixtures;
pub mod reconcile;
pub mod retry;
pub mod session;
pub mod verify;

pub use aggregate::{Aggregator, CheckRecord};
pub use config::{Browser, HarnessConfig, RoleScope};
pub use error::{E2eError, E2eResult};
pub use expectation::expected_for_role;
pub use extract::{Extractor, FixedExtractor};
pub use reconcile::{reconcile, Reconcilable, Reconciliation};
pub use retry::{poll_until, Readiness, RetryPolicy};
pub use verify::verify_role_visibility;
