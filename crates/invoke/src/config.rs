//! Contract configuration via `contracts.toml`
//!
//! A process-wide default is installed with [`ContractConfig::set_global`].
//! Each contract captures the global config when it is created, so changing
//! the global later never alters wrappers that already exist.

use crate::closure::WRAPPER_MARKER;
use contracts_core::{Error, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "contracts.toml";

/// Placeholder that replaces the synthetic wrapper marker in messages.
pub const DEFAULT_WRAPPER_PLACEHOLDER: &str = "the wrapper";

/// Contract configuration loaded from `contracts.toml`.
///
/// # Example
///
/// ```toml
/// validate_types = true
/// wrapper_placeholder = "the wrapper"
/// widen_int_to_float = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractConfig {
    /// Check arguments/results against declared type names.
    ///
    /// Arity checks and closure signature checks apply regardless.
    #[serde(default = "default_true")]
    pub validate_types: bool,
    /// Text substituted for the synthetic wrapper marker in error messages.
    #[serde(default = "default_placeholder")]
    pub wrapper_placeholder: String,
    /// Let the float reducer accept integer results.
    #[serde(default = "default_true")]
    pub widen_int_to_float: bool,
}

fn default_true() -> bool {
    true
}

fn default_placeholder() -> String {
    DEFAULT_WRAPPER_PLACEHOLDER.to_string()
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            validate_types: true,
            wrapper_placeholder: default_placeholder(),
            widen_int_to_float: true,
        }
    }
}

static GLOBAL_CONFIG: Lazy<RwLock<Arc<ContractConfig>>> =
    Lazy::new(|| RwLock::new(Arc::new(ContractConfig::default())));

impl ContractConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Closure contract configuration
#
# Validate arguments and results against declared type names (default: true).
# Arity and closure signature checks always apply.
validate_types = true

# Replaces the synthetic wrapper class name in error messages.
wrapper_placeholder = "the wrapper"

# Let value-to-float reducers accept integer results (default: true).
widen_int_to_float = true
"#
    }

    /// Parse and validate config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the text cannot be parsed or holds invalid values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ContractConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config { reason } => {
                Error::config(format!("{} (in '{}')", reason, path.display()))
            }
            other => other,
        })
    }

    /// Serialize this config to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))
    }

    /// Check values that deserialize fine but would break translation.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the placeholder is blank, contains parentheses,
    /// or contains the wrapper marker itself.
    pub fn validate(&self) -> Result<()> {
        let placeholder = self.wrapper_placeholder.trim();
        if placeholder.is_empty() {
            return Err(Error::config("wrapper_placeholder cannot be empty"));
        }
        if placeholder.contains(['(', ')']) {
            return Err(Error::config(
                "wrapper_placeholder cannot contain parentheses",
            ));
        }
        if placeholder.contains(WRAPPER_MARKER) {
            return Err(Error::config(format!(
                "wrapper_placeholder cannot contain '{}'",
                WRAPPER_MARKER
            )));
        }
        Ok(())
    }

    /// The process-wide default config.
    pub fn global() -> Arc<ContractConfig> {
        GLOBAL_CONFIG.read().clone()
    }

    /// Replace the process-wide default config.
    ///
    /// Affects contracts created afterwards only.
    pub fn set_global(config: ContractConfig) -> Result<()> {
        config.validate()?;
        *GLOBAL_CONFIG.write() = Arc::new(config);
        Ok(())
    }
}
