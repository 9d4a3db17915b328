//! Harness configuration
//!
//! Run scope is selected by the external test runner through environment
//! variables: `CASEWORK_ROLE_SCOPE` picks between the full role matrix
//! and a single representative role, `CASEWORK_BROWSER` picks the engine
//! the extraction layer drives. The CLI entry point can override both.

use std::path::PathBuf;
use std::str::FromStr;

use casework_common::types::Role;

use crate::retry::RetryPolicy;

pub const ENV_ROLE_SCOPE: &str = "CASEWORK_ROLE_SCOPE";
pub const ENV_BROWSER: &str = "CASEWORK_BROWSER";

/// Which roles a run exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleScope {
    /// Single representative role; quick signal.
    Smoke,
    /// Every role in the matrix.
    Full,
    /// Explicit subset.
    Explicit(Vec<Role>),
}

impl RoleScope {
    pub fn resolve(&self) -> Vec<Role> {
        match self {
            RoleScope::Smoke => vec![Role::representative()],
            RoleScope::Full => Role::all().to_vec(),
            RoleScope::Explicit(roles) => roles.clone(),
        }
    }
}

impl FromStr for RoleScope {
    type Err = casework_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smoke" => Ok(RoleScope::Smoke),
            "full" => Ok(RoleScope::Full),
            other => {
                // comma-separated role slugs
                let roles = other
                    .split(',')
                    .map(|r| r.trim().parse::<Role>())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(RoleScope::Explicit(roles))
            }
        }
    }
}

/// Browser engine the extraction layer drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl FromStr for Browser {
    type Err = casework_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(casework_common::Error::InvalidConfig(format!(
                "unknown browser: {other}"
            ))),
        }
    }
}

/// Top-level harness configuration.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub role_scope: RoleScope,
    pub browser: Browser,
    pub session_dir: PathBuf,
    pub results_dir: PathBuf,
    pub fixtures_dir: PathBuf,
    pub retry: RetryPolicy,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            role_scope: RoleScope::Smoke,
            browser: Browser::Chromium,
            session_dir: PathBuf::from("test-results/sessions"),
            results_dir: PathBuf::from("test-results"),
            fixtures_dir: PathBuf::from("fixtures"),
            retry: RetryPolicy::default(),
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by whatever the environment provides.
    ///
    /// A malformed value is an error, not a fallback: a typo in
    /// `CASEWORK_ROLE_SCOPE` silently degrading a full-matrix run to
    /// smoke scope would mask most of the suite.
    pub fn from_env() -> Result<Self, casework_common::Error> {
        let mut config = Self::default();
        if let Ok(scope) = std::env::var(ENV_ROLE_SCOPE) {
            config.role_scope = scope.parse().map_err(|e| {
                casework_common::Error::InvalidConfig(format!("{ENV_ROLE_SCOPE}={scope}: {e}"))
            })?;
        }
        if let Ok(browser) = std::env::var(ENV_BROWSER) {
            config.browser = browser.parse().map_err(|e| {
                casework_common::Error::InvalidConfig(format!("{ENV_BROWSER}={browser}: {e}"))
            })?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_scope_resolves_to_representative_role() {
        assert_eq!(RoleScope::Smoke.resolve(), vec![Role::representative()]);
    }

    #[test]
    fn full_scope_resolves_to_whole_matrix() {
        assert_eq!(RoleScope::Full.resolve().len(), Role::all().len());
    }

    #[test]
    fn explicit_scope_parses_comma_separated_slugs() {
        let scope: RoleScope = "judge,cps-prosecutor".parse().unwrap();
        assert_eq!(
            scope.resolve(),
            vec![Role::Judge, Role::CpsProsecutor]
        );
        assert!("judge,registrar".parse::<RoleScope>().is_err());
    }

    #[test]
    fn malformed_env_scope_is_an_error_not_a_fallback() {
        // single test owns these variables; set, assert, and restore
        std::env::set_var(ENV_ROLE_SCOPE, "ful");
        let err = HarnessConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("CASEWORK_ROLE_SCOPE=ful"));

        std::env::set_var(ENV_ROLE_SCOPE, "full");
        let config = HarnessConfig::from_env().unwrap();
        assert_eq!(config.role_scope, RoleScope::Full);

        std::env::remove_var(ENV_ROLE_SCOPE);
        assert_eq!(
            HarnessConfig::from_env().unwrap().role_scope,
            RoleScope::Smoke
        );
    }

    #[test]
    fn browser_parse() {
        assert_eq!("webkit".parse::<Browser>().unwrap(), Browser::Webkit);
        assert!("ie6".parse::<Browser>().is_err());
    }
}
