//! Configuration file schema
//!
//! The same schema is used for the global file and for `satchel.toml`.

use crate::{ConfigError, ConfigResult};
use satchel_core::DigPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted `output.indent`
pub const MAX_INDENT: usize = 16;

/// Contents of a satchel configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct SatchelConfig {
    /// Nested lookup settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dig: Option<DigConfig>,

    /// Output formatting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// `[dig]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct DigConfig {
    /// "strict" or "lenient"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<DigPolicy>,
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,

    /// Spaces per indentation level when pretty-printing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<usize>,
}

impl SatchelConfig {
    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(indent) = self.output.as_ref().and_then(|o| o.indent) {
            if indent > MAX_INDENT {
                return Err(ConfigError::InvalidValue {
                    field: "output.indent".to_string(),
                    reason: format!("must be at most {}, got {}", MAX_INDENT, indent),
                });
            }
        }
        Ok(())
    }

    /// Overlay `other` on top of `self`, field by field
    pub fn merge(self, other: SatchelConfig) -> SatchelConfig {
        let dig = match (self.dig, other.dig) {
            (Some(base), Some(over)) => Some(DigConfig {
                policy: over.policy.or(base.policy),
            }),
            (base, over) => over.or(base),
        };
        let output = match (self.output, other.output) {
            (Some(base), Some(over)) => Some(OutputConfig {
                pretty: over.pretty.or(base.pretty),
                indent: over.indent.or(base.indent),
            }),
            (base, over) => over.or(base),
        };
        SatchelConfig { dig, output }
    }

    pub fn dig_policy(&self) -> Option<DigPolicy> {
        self.dig.as_ref().and_then(|d| d.policy)
    }

    pub fn pretty(&self) -> Option<bool> {
        self.output.as_ref().and_then(|o| o.pretty)
    }

    pub fn indent(&self) -> Option<usize> {
        self.output.as_ref().and_then(|o| o.indent)
    }
}
