use anyhow::Result;
use std::sync::Arc;

use crate::config::{Config, ValidationResult};

/// Main application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    validation: ValidationResult,
}

impl App {
    /// Create a new application instance.
    ///
    /// Loads and validates the configuration; validation warnings are
    /// retained so the caller can surface them.
    pub fn new() -> Result<Self> {
        let (config, validation) = Config::load_validated()?;

        Ok(Self {
            config: Arc::new(config),
            validation,
        })
    }

    /// Build an application around an existing config (used by tests).
    pub fn with_config(config: Config) -> Self {
        let validation = config.validate();
        Self {
            config: Arc::new(config),
            validation,
        }
    }

    /// Get a shared handle to the application config
    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// Validation warnings collected at startup
    pub fn warnings(&self) -> &ValidationResult {
        &self.validation
    }
}
