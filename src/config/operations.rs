//! Config loading, validation, and fallback operations.

use super::model::Config;
use crate::error::{AftercareError, Result};
use std::collections::HashSet;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(AftercareError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            AftercareError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config, substituting defaults when the file is missing or unusable.
    ///
    /// A missing file is silent. A malformed file logs a warning and yields
    /// defaults; it never fails the run.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields are ignored for forward compatibility. An empty document
    /// yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| AftercareError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AftercareError::Config(format!("failed to serialize config: {}", e)))
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - project names are non-empty and unique
    /// - project paths and type-check commands are non-empty
    /// - timeouts and the recency threshold are positive
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for project in &self.validation.projects {
            if project.name.trim().is_empty() {
                return Err(AftercareError::Config(
                    "project names must be non-empty".to_string(),
                ));
            }
            if !names.insert(project.name.as_str()) {
                return Err(AftercareError::Config(format!(
                    "duplicate project name '{}'",
                    project.name
                )));
            }
            if project.path.trim().is_empty() {
                return Err(AftercareError::Config(format!(
                    "project '{}' has an empty path",
                    project.name
                )));
            }
            if project.typecheck_command.trim().is_empty() {
                return Err(AftercareError::Config(format!(
                    "project '{}' has an empty typecheck_command",
                    project.name
                )));
            }
        }

        if self.validation.command_timeout_secs == 0 || self.validation.cleanup_timeout_secs == 0 {
            return Err(AftercareError::Config(
                "command timeouts must be greater than 0".to_string(),
            ));
        }

        if self.cleanup.recent_hours == 0 {
            return Err(AftercareError::Config(
                "recent_hours must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
