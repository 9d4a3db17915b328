//! Harness entry point
//!
//! Run with: cargo test --package casework-e2e --test e2e
//!
//! Two modes:
//! - default: load fixtures, validate the catalogue, print the resolved
//!   role scope with per-role expected counts (dry-run validation that
//!   the fixture data and role matrix are coherent);
//! - `--merge`: global-teardown step - merge every worker result file,
//!   print the grouped summary, clean up worker and session files, and
//!   exit nonzero if any check failed.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use casework_common::catalogue::CaseCatalogue;
use casework_e2e::aggregate::Aggregator;
use casework_e2e::cleanup::swallow;
use casework_e2e::config::{Browser, HarnessConfig, RoleScope};
use casework_e2e::expectation::expected_for_role;
use casework_e2e::fixtures::FixtureSet;
use casework_e2e::session::SessionStore;
use casework_e2e::E2eResult;

#[derive(Parser, Debug)]
#[command(name = "casework-e2e")]
#[command(about = "Visibility verification harness for the casework UI")]
struct Args {
    /// Role scope: smoke, full, or comma-separated role slugs
    /// (overrides CASEWORK_ROLE_SCOPE)
    #[arg(long)]
    roles: Option<String>,

    /// Browser engine: chromium, firefox, webkit
    /// (overrides CASEWORK_BROWSER)
    #[arg(long)]
    browser: Option<String>,

    /// Directory of YAML fixture files
    #[arg(long, default_value = "fixtures")]
    fixtures: PathBuf,

    /// Directory holding per-worker result files
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,

    /// Directory holding per-role session state files
    #[arg(long, default_value = "test-results/sessions")]
    session_dir: PathBuf,

    /// Merge worker result files, report, and clean up
    #[arg(long)]
    merge: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}

fn run(args: Args) -> E2eResult<bool> {
    let mut config = HarnessConfig::from_env()?;
    config.fixtures_dir = args.fixtures;
    config.results_dir = args.output;
    config.session_dir = args.session_dir;
    if let Some(roles) = &args.roles {
        config.role_scope = roles.parse::<RoleScope>()?;
    }
    if let Some(browser) = &args.browser {
        config.browser = browser.parse::<Browser>()?;
    }

    if args.merge {
        merge_and_report(&config)
    } else {
        dry_run(&config)
    }
}

/// Global teardown: single reader over all worker files.
fn merge_and_report(config: &HarnessConfig) -> E2eResult<bool> {
    let merged = Aggregator::merge_worker_files(&config.results_dir)?;
    print!("{}", merged.summary());

    let passed = merged.passed();

    // Secondary failures here must not mask the verdict.
    swallow(
        "remove worker files",
        Aggregator::remove_worker_files(&config.results_dir),
    );
    swallow(
        "remove session files",
        SessionStore::new(&config.session_dir).remove_all(),
    );

    Ok(passed)
}

/// Validate fixtures and show what each role in scope is expected to see.
fn dry_run(config: &HarnessConfig) -> E2eResult<bool> {
    let fixtures = FixtureSet::load_all(&config.fixtures_dir)?;

    let mut catalogue = CaseCatalogue::new();
    for note in fixtures.expected_notes() {
        catalogue.push_note(note);
    }
    let findings = catalogue.validate();

    let roles = config.role_scope.resolve();
    println!(
        "browser: {}, roles in scope: {}",
        config.browser.as_str(),
        roles.len()
    );
    for role in &roles {
        let notes = expected_for_role(*role, catalogue.notes()).len();
        let links = expected_for_role(*role, &fixtures.navigation).len();
        println!(
            "  {:<20} expects {notes} note(s), {links} navigation link(s)",
            role.label()
        );
    }

    if findings > 0 {
        println!("{findings} fixture finding(s) logged; see warnings above");
    }

    Ok(findings == 0)
}
