//! Configuration file parsing for `propwise.toml`.
//!
//! ```toml
//! [copy]
//! on_mismatch = "skip"
//!
//! [predicate]
//! skip_blank_strings = true
//!
//! [environments.test.copy]
//! on_mismatch = "abort"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::copy::{CopyOptions, MismatchPolicy};
use crate::error::ConfigError;
use crate::predicate::SynthesisOptions;

/// Main configuration structure for `propwise.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PropwiseConfig {
    /// Selective copy settings.
    #[serde(default)]
    pub copy: CopyConfig,

    /// Filter synthesis settings.
    #[serde(default)]
    pub predicate: PredicateConfig,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentOverride>,
}

impl PropwiseConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        content.parse()
    }

    /// Apply environment-specific overrides.
    pub fn with_environment(mut self, env: &str) -> Self {
        if let Some(overrides) = self.environments.remove(env) {
            if let Some(copy) = overrides.copy {
                if let Some(policy) = copy.on_mismatch {
                    self.copy.on_mismatch = policy;
                }
            }
            if let Some(predicate) = overrides.predicate {
                if let Some(skip) = predicate.skip_blank_strings {
                    self.predicate.skip_blank_strings = skip;
                }
            }
        }
        self
    }

    /// Options for the copy operations.
    pub fn copy_options(&self) -> CopyOptions {
        CopyOptions::new().on_mismatch(self.copy.on_mismatch)
    }

    /// Options for filter synthesis.
    pub fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            skip_blank_strings: self.predicate.skip_blank_strings,
        }
    }
}

impl std::str::FromStr for PropwiseConfig {
    type Err = ConfigError;

    /// Parse configuration from a TOML string, expanding `${VAR}` references.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let expanded = expand_env_vars(content);
        toml::from_str(&expanded).map_err(|e| ConfigError::Toml { source: e })
    }
}

/// Selective copy configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CopyConfig {
    /// Handling of values the destination cannot hold.
    #[serde(default)]
    pub on_mismatch: MismatchPolicy,
}

/// Filter synthesis configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PredicateConfig {
    /// Skip filter values whose textual form is empty.
    #[serde(default = "default_true")]
    pub skip_blank_strings: bool,
}

impl Default for PredicateConfig {
    fn default() -> Self {
        Self {
            skip_blank_strings: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentOverride {
    /// Copy overrides.
    pub copy: Option<CopyOverride>,

    /// Predicate overrides.
    pub predicate: Option<PredicateOverride>,
}

/// Copy configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CopyOverride {
    /// Override the mismatch policy.
    pub on_mismatch: Option<MismatchPolicy>,
}

/// Predicate configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PredicateOverride {
    /// Override blank string handling.
    pub skip_blank_strings: Option<bool>,
}

/// Replace `${VAR}` with the variable's value; unknown variables are kept.
fn expand_env_vars(content: &str) -> String {
    let Ok(re) = regex_lite::Regex::new(r"\$\{([^}]+)\}") else {
        return content.to_string();
    };

    re.replace_all(content, |caps: &regex_lite::Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}
