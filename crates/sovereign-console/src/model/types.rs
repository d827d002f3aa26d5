use serde::{Deserialize, Serialize};

/// Model settings nested under `llm_config` in an agent definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Agent identity, target model and prompt template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub description: String,
    /// Model identifier lives here, not at the top level.
    pub llm_config: LlmConfig,
    /// Free text with `{{name}}` and `{{color}}` placeholders. Not validated.
    pub prompt_template: String,
}

pub const SIMPLE_GREETER_PROMPT: &str = "You are a friendly and concise assistant.
A user will provide their name and their favorite color.
Your task is to greet them warmly by name and make a positive comment about their favorite color.
Keep your response to 1-2 sentences.

User's Name: {{name}}
Favorite Color: {{color}}";

impl AgentConfig {
    /// The built-in `SimpleGreeter` agent every console starts from.
    pub fn simple_greeter() -> Self {
        Self {
            name: "SimpleGreeter".to_string(),
            description:
                "A basic agent that greets a user by name and mentions their favorite color."
                    .to_string(),
            llm_config: LlmConfig {
                model: "mistralai/mistral-7b-instruct".to_string(),
                temperature: Some(0.5),
                max_tokens: None,
            },
            prompt_template: SIMPLE_GREETER_PROMPT.to_string(),
        }
    }

    pub fn model_identifier(&self) -> &str {
        &self.llm_config.model
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::simple_greeter()
    }
}
