//! Command-line interface parsing for the hospital management console
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --role flag for preselecting a login role and the --demo flag that enables
//! the fixture fallback.

use clap::Parser;
use thiserror::Error;

use crate::api::FallbackMode;
use crate::data::Role;

/// Environment variable that enables the fixture fallback, equivalent to --demo
pub const DEMO_ENV_VAR: &str = "HMS_DEMO";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified role name is not recognized
    #[error("Invalid role: '{0}'. Valid roles: admin, doctor, patient, receptionist")]
    InvalidRole(String),
}

/// Hospital management console - dashboards over the clinic backend
#[derive(Parser, Debug)]
#[command(name = "hms-console")]
#[command(about = "Hospital management dashboards for admins, doctors, and patients")]
#[command(version)]
pub struct Cli {
    /// Base URL of the backend API
    #[arg(long, value_name = "URL", default_value = "http://127.0.0.1:8000/api")]
    pub base_url: String,

    /// Preselect the login role
    ///
    /// Examples:
    ///   hms-console --role admin    # Login form starts on the admin role
    ///   hms-console --role doctor   # Login form starts on the doctor role
    ///
    /// Valid roles: admin, doctor, patient, receptionist
    #[arg(long, value_name = "ROLE")]
    pub role: Option<String>,

    /// Substitute demo fixtures when the backend is unreachable
    ///
    /// Also enabled by setting the HMS_DEMO environment variable.
    #[arg(long)]
    pub demo: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Base URL the gateway client targets
    pub base_url: String,
    /// Role preselected on the login form (if specified)
    pub initial_role: Option<Role>,
    /// Whether the gateway substitutes fixtures for failed reads
    pub fallback: FallbackMode,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            initial_role: None,
            fallback: FallbackMode::Disabled,
        }
    }
}

/// Parses a role string argument into a Role enum.
///
/// # Arguments
/// * `s` - The role string from CLI
///
/// # Returns
/// * `Ok(Role)` if the string matches a valid role
/// * `Err(CliError::InvalidRole)` if the string doesn't match
pub fn parse_role_arg(s: &str) -> Result<Role, CliError> {
    Role::from_str(s).ok_or_else(|| CliError::InvalidRole(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// The fixture fallback is off by default and turns on via --demo or the
    /// HMS_DEMO environment variable; demo data must never appear unless it
    /// was explicitly asked for.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid role was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_role = match &cli.role {
            None => None,
            Some(role_str) => Some(parse_role_arg(role_str)?),
        };

        let fallback = if cli.demo || std::env::var_os(DEMO_ENV_VAR).is_some() {
            FallbackMode::DemoFixtures
        } else {
            FallbackMode::Disabled
        };

        Ok(StartupConfig {
            base_url: cli.base_url.clone(),
            initial_role,
            fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_arg_all_roles() {
        assert_eq!(parse_role_arg("admin").unwrap(), Role::Admin);
        assert_eq!(parse_role_arg("doctor").unwrap(), Role::Doctor);
        assert_eq!(parse_role_arg("patient").unwrap(), Role::Patient);
        assert_eq!(parse_role_arg("receptionist").unwrap(), Role::Receptionist);
    }

    #[test]
    fn test_parse_role_arg_is_case_insensitive() {
        assert_eq!(parse_role_arg("Admin").unwrap(), Role::Admin);
        assert_eq!(parse_role_arg("DOCTOR").unwrap(), Role::Doctor);
    }

    #[test]
    fn test_parse_role_arg_invalid() {
        let result = parse_role_arg("janitor");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid role"));
        assert!(err.to_string().contains("janitor"));
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000/api");
        assert!(config.initial_role.is_none());
        assert_eq!(config.fallback, FallbackMode::Disabled);
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["hms-console"]);
        assert_eq!(cli.base_url, "http://127.0.0.1:8000/api");
        assert!(cli.role.is_none());
        assert!(!cli.demo);
    }

    #[test]
    fn test_cli_parse_base_url_override() {
        let cli = Cli::parse_from(["hms-console", "--base-url", "https://clinic.example/api"]);
        assert_eq!(cli.base_url, "https://clinic.example/api");
    }

    #[test]
    fn test_cli_parse_role_and_demo() {
        let cli = Cli::parse_from(["hms-console", "--role", "doctor", "--demo"]);
        assert_eq!(cli.role.as_deref(), Some("doctor"));
        assert!(cli.demo);
    }

    #[test]
    fn test_startup_config_from_cli_defaults() {
        let cli = Cli::parse_from(["hms-console"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.initial_role.is_none());
        // HMS_DEMO may be set in the ambient environment of some shells; only
        // assert the flag path when it is absent.
        if std::env::var_os(DEMO_ENV_VAR).is_none() {
            assert_eq!(config.fallback, FallbackMode::Disabled);
        }
    }

    #[test]
    fn test_startup_config_from_cli_demo_flag() {
        let cli = Cli::parse_from(["hms-console", "--demo"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.fallback, FallbackMode::DemoFixtures);
    }

    #[test]
    fn test_startup_config_from_cli_role() {
        let cli = Cli::parse_from(["hms-console", "--role", "patient"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_role, Some(Role::Patient));
    }

    #[test]
    fn test_startup_config_from_cli_invalid_role() {
        let cli = Cli::parse_from(["hms-console", "--role", "janitor"]);
        let result = StartupConfig::from_cli(&cli);
        assert!(result.is_err());
    }
}
