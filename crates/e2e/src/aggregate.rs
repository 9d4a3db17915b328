//! Run-level result aggregation
//!
//! Each worker process accumulates check records in its own
//! [`Aggregator`] and writes them to its own `worker-<index>.json` file;
//! no locking is needed because every worker owns its file exclusively.
//! Global teardown performs the single read-only merge, prints the
//! grouped summary, and removes the files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{E2eError, E2eResult};

const WORKER_FILE_PREFIX: &str = "worker-";

/// One reconciliation outcome for a (user, category) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    pub user: String,
    /// Test heading the check ran under, e.g. the case reference.
    pub heading: String,
    pub category: String,
    /// Empty means the check passed.
    pub issues: Vec<String>,
}

/// Envelope persisted per worker.
#[derive(Debug, Serialize, Deserialize)]
struct WorkerResults {
    worker_index: usize,
    written_at: chrono::DateTime<chrono::Utc>,
    records: Vec<CheckRecord>,
}

/// Accumulates check records across the tests of one worker process.
#[derive(Debug, Default, Clone)]
pub struct Aggregator {
    records: Vec<CheckRecord>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit reset at run start.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    pub fn record(
        &mut self,
        user: impl Into<String>,
        heading: impl Into<String>,
        category: impl Into<String>,
        issues: Vec<String>,
    ) {
        self.records.push(CheckRecord {
            user: user.into(),
            heading: heading.into(),
            category: category.into(),
            issues,
        });
    }

    pub fn records(&self) -> &[CheckRecord] {
        &self.records
    }

    /// Logical AND over every record. Meaningful only after all tests
    /// have reported; a dirty category never stops later records from
    /// being collected.
    pub fn passed(&self) -> bool {
        self.records.iter().all(|r| r.issues.is_empty())
    }

    /// Human-readable report grouped by category. Failing records
    /// enumerate every issue; passing ones are listed as such.
    pub fn summary(&self) -> String {
        let mut categories: Vec<&str> = Vec::new();
        for record in &self.records {
            if !categories.contains(&record.category.as_str()) {
                categories.push(&record.category);
            }
        }

        let mut out = String::new();
        for category in categories {
            out.push_str(&format!("== {category} ==\n"));
            for record in self.records.iter().filter(|r| r.category == category) {
                if record.issues.is_empty() {
                    out.push_str(&format!("  PASS {} [{}]\n", record.user, record.heading));
                } else {
                    out.push_str(&format!(
                        "  FAIL {} [{}] ({} issue(s))\n",
                        record.user,
                        record.heading,
                        record.issues.len()
                    ));
                    for issue in &record.issues {
                        out.push_str(&format!("       - {issue}\n"));
                    }
                }
            }
        }
        out.push_str(&format!(
            "overall: {}\n",
            if self.passed() { "PASS" } else { "FAIL" }
        ));
        out
    }

    /// Persist this worker's records as `worker-<index>.json` under
    /// `dir`. Overwrites any previous write by the same worker.
    pub fn write_worker_file(&self, dir: &Path, worker_index: usize) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{WORKER_FILE_PREFIX}{worker_index}.json"));
        let envelope = WorkerResults {
            worker_index,
            written_at: chrono::Utc::now(),
            records: self.records.clone(),
        };
        std::fs::write(&path, serde_json::to_string_pretty(&envelope)?)?;
        debug!(path = %path.display(), records = self.records.len(), "worker results written");
        Ok(path)
    }

    /// Read every `worker-*.json` under `dir`, sorted by file name for a
    /// deterministic merge order. Runs once, at global teardown, after
    /// all workers have finished.
    pub fn merge_worker_files(dir: &Path) -> E2eResult<Aggregator> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_worker_file = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(WORKER_FILE_PREFIX) && n.ends_with(".json"))
                .unwrap_or(false);
            if is_worker_file {
                paths.push(path);
            }
        }
        paths.sort();

        let mut merged = Aggregator::new();
        for path in &paths {
            let content = std::fs::read_to_string(path)?;
            let envelope: WorkerResults = serde_json::from_str(&content).map_err(|e| {
                E2eError::ResultFile(format!("malformed worker file {}: {e}", path.display()))
            })?;
            merged.records.extend(envelope.records);
        }

        info!(
            workers = paths.len(),
            records = merged.records.len(),
            "merged worker result files"
        );
        Ok(merged)
    }

    /// Delete worker result files after the merge has been reported.
    pub fn remove_worker_files(dir: &Path) -> E2eResult<()> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_worker_file = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(WORKER_FILE_PREFIX) && n.ends_with(".json"))
                .unwrap_or(false);
            if is_worker_file {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}
