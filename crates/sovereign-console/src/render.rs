//! Plain-text rendering of the configuration and run panels.

use crate::model::{AgentConfig, ConfigField};
use crate::runner::RunRequest;

pub const RUN_LABEL: &str = "Run Agent (Simulated)";
pub const RUNNING_LABEL: &str = "Running...";

fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

pub fn config_panel(cfg: &AgentConfig) -> String {
    let mut out = heading("Agent Configuration");
    for field in ConfigField::ALL {
        let marker = if field.read_only() { " (read-only)" } else { "" };
        let value = cfg.field(field);
        if value.contains('\n') {
            out.push_str(&format!("{}{}:\n", field.label(), marker));
            for line in value.lines() {
                out.push_str(&format!("    {line}\n"));
            }
        } else {
            out.push_str(&format!("{}{}: {}\n", field.label(), marker, value));
        }
    }
    if let Some(t) = cfg.llm_config.temperature {
        out.push_str(&format!("Temperature: {t}\n"));
    }
    out
}

pub fn run_panel(agent_name: &str, state: &RunRequest) -> String {
    let mut out = heading(&format!("Run Agent: {agent_name}"));
    out.push_str(&format!("Your Name: {}\n", state.user_name));
    out.push_str(&format!("Favorite Color: {}\n", state.user_color));
    let label = if state.busy { RUNNING_LABEL } else { RUN_LABEL };
    let enabled = if state.can_trigger() { "" } else { " (disabled)" };
    out.push_str(&format!("[{label}]{enabled}\n"));

    if let Some(output) = state.output.as_deref().filter(|o| !o.is_empty()) {
        out.push_str(&format!("\nAgent Output:\n{output}\n"));
    }
    if let Some(cmd) = state.command_preview.as_deref().filter(|c| !c.is_empty()) {
        out.push_str("\nTo run this for real (locally): ensure your Python virtual environment is active and OPENROUTER_API_KEY is set. Then, from the project root, run:\n");
        out.push_str(&format!("  {cmd}\n"));
    }
    out
}
