//! Holder for the agent configuration shown in the configuration panel.

use super::fields::{ConfigField, FieldError};
use super::types::AgentConfig;

/// Configuration panel state. Updates produce a new value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigModel {
    config: AgentConfig,
}

impl ConfigModel {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn update_field(&self, field: ConfigField, value: impl Into<String>) -> Self {
        Self {
            config: self.config.update_field(field, value),
        }
    }

    /// Update by field name, as a form change handler would.
    pub fn update_named(&self, field: &str, value: impl Into<String>) -> Result<Self, FieldError> {
        let field: ConfigField = field.parse()?;
        Ok(self.update_field(field, value))
    }
}
