//! Agent definition parsers.
//!
//! Each parser declares a `supports` predicate over file paths and a `parse`
//! function that returns a normalized `AgentDefinition`.

use std::path::{Path, PathBuf};

use crate::model::AgentConfig;

/// A parsed agent definition: the configuration record plus the JSON schema
/// describing the inputs the runner expects.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDefinition {
    pub config: AgentConfig,
    pub input_schema: serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("failed to read agent definition {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("agent definition {} is missing required key(s): {}", .path.display(), .keys.join(", "))]
    MissingKeys { path: PathBuf, keys: Vec<&'static str> },
    #[error("agent definition {} has no llm_config.model", .0.display())]
    MissingModel(PathBuf),
    #[error("no parser supports {}", .0.display())]
    Unsupported(PathBuf),
}

/// Parser trait implemented by definition formats.
pub trait AgentParser {
    fn supports(path: &Path) -> bool;
    fn parse(content: &str, path: &Path) -> Result<AgentDefinition, DefinitionError>;
}

/// Read and parse an agent definition file.
pub fn load_definition(path: &Path) -> Result<AgentDefinition, DefinitionError> {
    if !agent_yaml::AgentYamlParser::supports(path) {
        return Err(DefinitionError::Unsupported(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let def = agent_yaml::AgentYamlParser::parse(&content, path)?;
    tracing::info!(
        "agent '{}' loaded from {} (model={})",
        def.config.name,
        path.display(),
        def.config.model_identifier()
    );
    Ok(def)
}

pub mod agent_yaml;
