use std::sync::OnceLock;

use crate::archive::{ArchiveOptions, Indent};
use crate::errors::{PicklingError, Result};

pub const ENV_DEBUG: &str = "PICKLING_DEBUG";
pub const ENV_INDENT: &str = "PICKLING_INDENT";

/// Immutable configuration read once from environment variables.
///
/// Access via `PicklingConfig::get()` which returns a `&'static PicklingConfig`.
/// `PicklingConfig::init()` does the same but reports invalid variables instead
/// of falling back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PicklingConfig {
    /// Enables debug-level logging.
    pub debug: bool,
    /// Indentation used when the caller does not ask for pretty output.
    pub indent: Indent,
}

static CONFIG: OnceLock<PicklingConfig> = OnceLock::new();

impl PicklingConfig {
    /// Returns the global configuration, initializing it from the environment
    /// on first call. Invalid variables fall back to defaults.
    pub fn get() -> &'static PicklingConfig {
        CONFIG.get_or_init(|| {
            Self::from_env().unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid configuration: {}", e);
                Self::default()
            })
        })
    }

    /// Initializes the global configuration from the environment, failing on
    /// invalid variables. Later calls return the already stored value.
    pub fn init() -> Result<&'static PicklingConfig> {
        if let Some(config) = CONFIG.get() {
            return Ok(config);
        }
        let config = Self::from_env()?;
        Ok(CONFIG.get_or_init(|| config))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Builds a configuration from explicit `(name, value)` pairs. Unrelated
    /// names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (name, value) in vars {
            match name.as_ref() {
                ENV_DEBUG => config.debug = parse_bool(ENV_DEBUG, value.as_ref())?,
                ENV_INDENT => {
                    config.indent = value
                        .as_ref()
                        .parse()
                        .map_err(|e| PicklingError::Config(format!("{ENV_INDENT}: {e}")))?
                }
                _ => {}
            }
        }
        Ok(config)
    }

    pub fn archive_options(&self) -> ArchiveOptions {
        ArchiveOptions {
            indent: self.indent,
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(PicklingError::Config(format!(
            "{name}: expected a boolean, got {other:?}"
        ))),
    }
}
