//! Parser for `.agent.yaml` agent definitions.

use serde::Deserialize;
use std::path::Path;

use crate::model::{AgentConfig, LlmConfig};

use super::{AgentDefinition, AgentParser, DefinitionError};

/// Parser for `*.agent.yaml` / `*.agent.yml` files.
pub struct AgentYamlParser;

// Everything optional so missing keys can be reported together.
#[derive(Debug, Deserialize)]
struct RawDefinition {
    name: Option<String>,
    #[serde(default)]
    description: String,
    llm_config: Option<RawLlmConfig>,
    prompt_template: Option<String>,
    input_schema: Option<serde_yaml::Value>,
}

#[derive(Debug, Deserialize)]
struct RawLlmConfig {
    model: Option<String>,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
}

impl AgentParser for AgentYamlParser {
    fn supports(path: &Path) -> bool {
        let Some(fname) = path.file_name().and_then(|s| s.to_str()) else {
            return false;
        };
        fname.ends_with(".agent.yaml") || fname.ends_with(".agent.yml")
    }

    fn parse(content: &str, path: &Path) -> Result<AgentDefinition, DefinitionError> {
        let raw: RawDefinition =
            serde_yaml::from_str(content).map_err(|source| DefinitionError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;

        let mut missing = Vec::new();
        if raw.name.is_none() {
            missing.push("name");
        }
        if raw.llm_config.is_none() {
            missing.push("llm_config");
        }
        if raw.prompt_template.is_none() {
            missing.push("prompt_template");
        }
        if raw.input_schema.is_none() {
            missing.push("input_schema");
        }
        let (Some(name), Some(llm), Some(prompt_template), Some(schema)) = (
            raw.name,
            raw.llm_config,
            raw.prompt_template,
            raw.input_schema,
        ) else {
            return Err(DefinitionError::MissingKeys {
                path: path.to_path_buf(),
                keys: missing,
            });
        };
        let Some(model) = llm.model else {
            return Err(DefinitionError::MissingModel(path.to_path_buf()));
        };

        // YAML values always have a JSON form once keys are strings; anything
        // else degrades to an empty schema.
        let input_schema = serde_json::to_value(&schema).unwrap_or_else(|e| {
            tracing::warn!("input_schema in {} is not JSON-compatible: {}", path.display(), e);
            serde_json::Value::Object(Default::default())
        });

        Ok(AgentDefinition {
            config: AgentConfig {
                name,
                description: raw.description,
                llm_config: LlmConfig {
                    model,
                    temperature: llm.temperature,
                    max_tokens: llm.max_tokens,
                },
                prompt_template,
            },
            input_schema,
        })
    }
}
