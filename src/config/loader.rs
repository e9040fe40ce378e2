//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::CalculatorConfig;

/// Loads and validates engine configuration.
///
/// A configuration file only needs the sections it overrides; everything
/// else falls back to [`CalculatorConfig::default`].
///
/// # Example
///
/// ```
/// use pf_shortfall::config::ConfigLoader;
///
/// let loader = ConfigLoader::from_yaml_str("fiscal_year_cutoff_month: 2\n").unwrap();
/// assert_eq!(loader.config().fiscal_year_cutoff_month, 2);
/// assert_eq!(loader.config().minimum_paid.otherwise, 1250);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CalculatorConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or unknown fields (`ConfigParseError`)
    /// - A value is out of range (`InvalidConfig`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pf_shortfall::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/pf_default.yaml")?;
    /// # Ok::<(), pf_shortfall::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        debug!(path = %path_str, "Loading calculator configuration");
        Self::parse(&content, &path_str)
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        Self::parse(yaml, "<inline>")
    }

    fn parse(yaml: &str, source: &str) -> EngineResult<Self> {
        let config: CalculatorConfig =
            serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> CalculatorConfig {
        self.config
    }
}
