//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::settings::{DigConfig, OutputConfig, SatchelConfig};
use crate::{ConfigError, ConfigResult};
use satchel_core::DigPolicy;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "satchel.toml";

const DEFAULT_INDENT: usize = 2;

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.satchel/config.toml) - lowest priority
/// 2. Project config (./satchel.toml) - overrides global
/// 3. Environment variables (SATCHEL_*) - overrides project
/// 4. CLI flags - highest priority (handled by caller)
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Merged settings from every source
    pub settings: SatchelConfig,

    /// Directory where satchel.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Create a loader that reads the global config from `path` instead of the home directory
    pub fn with_global_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find satchel.toml, then merges it over the
    /// global config and applies environment overrides.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;
        let global_config = self.load_global_config()?;
        let settings = self.apply_env_overrides(global_config.merge(project_config))?;

        Ok(Config {
            settings,
            project_root,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = SatchelConfig::load_from_file(config_path)?;
        debug!(path = %config_path.display(), "loaded project config");
        let global_config = self.load_global_config()?;
        let settings = self.apply_env_overrides(global_config.merge(project_config))?;

        Ok(Config {
            settings,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, SatchelConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);

            if config_path.exists() {
                let project_config = SatchelConfig::load_from_file(&config_path)?;
                debug!(path = %config_path.display(), "loaded project config");
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, SatchelConfig::default())),
            }
        }
    }

    /// Load global configuration; a missing file or home directory yields defaults
    fn load_global_config(&mut self) -> ConfigResult<SatchelConfig> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => match Self::global_config_dir() {
                Ok(dir) => {
                    let path = dir.join("config.toml");
                    self.global_config_path = Some(path.clone());
                    path
                }
                Err(ConfigError::HomeNotFound) => return Ok(SatchelConfig::default()),
                Err(e) => return Err(e),
            },
        };

        if !path.exists() {
            return Ok(SatchelConfig::default());
        }

        let config = SatchelConfig::load_from_file(&path)?;
        debug!(path = %path.display(), "loaded global config");
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// - SATCHEL_DIG_POLICY=strict|lenient
    /// - SATCHEL_PRETTY=true|false (also 1/0, yes/no, on/off)
    fn apply_env_overrides(&self, mut config: SatchelConfig) -> ConfigResult<SatchelConfig> {
        if let Ok(policy) = env::var("SATCHEL_DIG_POLICY") {
            let policy: DigPolicy = policy
                .parse()
                .map_err(|reason| ConfigError::InvalidValue {
                    field: "SATCHEL_DIG_POLICY".to_string(),
                    reason,
                })?;
            config.dig.get_or_insert_with(DigConfig::default).policy = Some(policy);
        }

        if let Ok(pretty) = env::var("SATCHEL_PRETTY") {
            let pretty_bool = parse_flag(&pretty).ok_or_else(|| ConfigError::InvalidValue {
                field: "SATCHEL_PRETTY".to_string(),
                reason: format!("expected true/false, 1/0, yes/no or on/off, got '{}'", pretty),
            })?;
            config.output.get_or_insert_with(OutputConfig::default).pretty = Some(pretty_bool);
        }

        Ok(config)
    }

    /// Get the global configuration directory (~/.satchel)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".satchel"))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Effective dig policy (default: strict)
    pub fn dig_policy(&self) -> DigPolicy {
        self.settings.dig_policy().unwrap_or_default()
    }

    /// Effective pretty-print flag (default: true)
    pub fn pretty(&self) -> bool {
        self.settings.pretty().unwrap_or(true)
    }

    /// Effective indentation width (default: 2)
    pub fn indent(&self) -> usize {
        self.settings.indent().unwrap_or(DEFAULT_INDENT)
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if a satchel.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
