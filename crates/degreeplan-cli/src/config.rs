//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use degreeplan::{DegreePlanError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for DegreePlanError {
    fn from(err: ConfigError) -> Self {
        DegreePlanError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (degreeplan/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, DegreePlanError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("degreeplan/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "degreeplan", "degreeplan") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, DegreePlanError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<AppConfig, DegreePlanError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use degreeplan::rule::RuleType;

    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r#"
            [prerequisites]
            max_depth = 8

            [rules]
            consolidated = ["total_credits", "min_grade"]
            "#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.prerequisites().max_depth(), 8);
        assert_eq!(config.prerequisites().classification_ids().count(), 3);
        let set = config.rules().consolidation_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains(RuleType::MinGrade));
        assert!(!set.contains(RuleType::MinCredits));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").expect("Empty config should use defaults");
        assert_eq!(config.rules().consolidation_set().len(), 8);
    }

    #[test]
    fn test_unknown_rule_type_is_an_error() {
        let result = parse_config("[rules]\nconsolidated = [\"no_such_rule\"]");
        assert!(matches!(result, Err(DegreePlanError::Config(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = load_config(Some("does/not/exist.toml"));
        assert!(matches!(result, Err(DegreePlanError::Config(_))));
    }
}
