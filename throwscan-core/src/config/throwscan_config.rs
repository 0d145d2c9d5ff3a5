//! Top-level throwscan configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::AnalysisConfig;
use crate::errors::ConfigError;

/// Name of the project-level config file.
pub const PROJECT_CONFIG_FILE: &str = "throwscan.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`THROWSCAN_*`)
/// 3. Project config (`throwscan.toml` in project root)
/// 4. User config (`~/.throwscan/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThrowscanConfig {
    pub analysis: AnalysisConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub check_invoked_callables: Option<bool>,
    pub ignored_exception_types: Option<Vec<String>>,
}

impl ThrowscanConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        // Unreadable user config is not fatal; keep defaults.
                        ::tracing::warn!(error = %e, "ignoring user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        ::tracing::debug!(
            check_invoked_callables = config.analysis.effective_check_invoked_callables(),
            ignored = config.analysis.ignored_exception_types.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    ///
    /// Empty ignore entries are tolerated (they are skipped when the ignore
    /// list is built); entries with interior whitespace are not type names.
    pub fn validate(config: &ThrowscanConfig) -> Result<(), ConfigError> {
        for (i, entry) in config.analysis.ignored_exception_types.iter().enumerate() {
            if entry.trim().chars().any(char::is_whitespace) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("analysis.ignored_exception_types[{i}]"),
                    message: format!("'{entry}' is not a type name"),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.throwscan/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut ThrowscanConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ThrowscanConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut ThrowscanConfig, other: &ThrowscanConfig) {
        if other.analysis.check_invoked_callables.is_some() {
            base.analysis.check_invoked_callables = other.analysis.check_invoked_callables;
        }
        if !other.analysis.ignored_exception_types.is_empty() {
            base.analysis.ignored_exception_types =
                other.analysis.ignored_exception_types.clone();
        }
    }

    /// Apply environment variable overrides.
    /// `THROWSCAN_CHECK_INVOKED_CALLABLES` takes `true`/`false`;
    /// `THROWSCAN_IGNORED_EXCEPTION_TYPES` is comma-separated.
    fn apply_env_overrides(config: &mut ThrowscanConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("THROWSCAN_CHECK_INVOKED_CALLABLES") {
            let v = val.trim().parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                field: "THROWSCAN_CHECK_INVOKED_CALLABLES".to_string(),
                message: format!("expected true or false, got '{val}'"),
            })?;
            config.analysis.check_invoked_callables = Some(v);
        }
        if let Ok(val) = std::env::var("THROWSCAN_IGNORED_EXCEPTION_TYPES") {
            config.analysis.ignored_exception_types = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut ThrowscanConfig, cli: &CliOverrides) {
        if let Some(v) = cli.check_invoked_callables {
            config.analysis.check_invoked_callables = Some(v);
        }
        if let Some(ref v) = cli.ignored_exception_types {
            config.analysis.ignored_exception_types = v.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.throwscan/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".throwscan"))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
