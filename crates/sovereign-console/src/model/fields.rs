//! Field-level updates on the agent configuration record.

use std::fmt;
use std::str::FromStr;

use super::types::AgentConfig;

/// The editable fields of an [`AgentConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Name,
    Description,
    ModelIdentifier,
    PromptTemplate,
}

impl ConfigField {
    pub const ALL: [ConfigField; 4] = [
        ConfigField::Name,
        ConfigField::Description,
        ConfigField::ModelIdentifier,
        ConfigField::PromptTemplate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigField::Name => "name",
            ConfigField::Description => "description",
            ConfigField::ModelIdentifier => "modelIdentifier",
            ConfigField::PromptTemplate => "promptTemplate",
        }
    }

    /// Form label shown next to the field.
    pub fn label(self) -> &'static str {
        match self {
            ConfigField::Name => "Agent Name",
            ConfigField::Description => "Description",
            ConfigField::ModelIdentifier => "LLM Model",
            ConfigField::PromptTemplate => "Prompt Template",
        }
    }

    /// Only the model identifier and the prompt template are editable in the form.
    pub fn read_only(self) -> bool {
        matches!(self, ConfigField::Name | ConfigField::Description)
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown config field '{0}' (expected name, description, modelIdentifier or promptTemplate)")]
    Unknown(String),
}

impl FromStr for ConfigField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Form input names are accepted alongside the canonical ones.
        match s.trim() {
            "name" => Ok(ConfigField::Name),
            "description" => Ok(ConfigField::Description),
            "modelIdentifier" | "llm_model" => Ok(ConfigField::ModelIdentifier),
            "promptTemplate" | "prompt_template" => Ok(ConfigField::PromptTemplate),
            other => Err(FieldError::Unknown(other.to_string())),
        }
    }
}

impl AgentConfig {
    /// Return a copy with `field` replaced by `value`; every other field is untouched.
    pub fn update_field(&self, field: ConfigField, value: impl Into<String>) -> AgentConfig {
        let value = value.into();
        let mut next = self.clone();
        match field {
            ConfigField::Name => next.name = value,
            ConfigField::Description => next.description = value,
            ConfigField::ModelIdentifier => next.llm_config.model = value,
            ConfigField::PromptTemplate => next.prompt_template = value,
        }
        tracing::debug!("config field updated: field={}", field);
        next
    }

    pub fn field(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::Name => &self.name,
            ConfigField::Description => &self.description,
            ConfigField::ModelIdentifier => &self.llm_config.model,
            ConfigField::PromptTemplate => &self.prompt_template,
        }
    }
}
