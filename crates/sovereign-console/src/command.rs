//! Construction of the local runner invocation shown to the user.

pub const DEFAULT_INTERPRETER: &str = "python";
pub const DEFAULT_SCRIPT_PATH: &str = "packages/agent-runner/run_agent.py";
pub const DEFAULT_CONFIG_PATH: &str = "packages/agent-runner/examples/SimpleGreeter.agent.yaml";

/// Payload passed to the runner via `--input-json`. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInput {
    pub name: String,
    pub color: String,
}

impl RunInput {
    /// `{"name":..,"color":..}` with standard JSON string escaping.
    pub fn to_json(&self) -> String {
        format!(
            "{{\"name\":{},\"color\":{}}}",
            serde_json::Value::String(self.name.clone()),
            serde_json::Value::String(self.color.clone())
        )
    }

    pub fn to_json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut m = serde_json::Map::new();
        m.insert("name".into(), self.name.clone().into());
        m.insert("color".into(), self.color.clone().into());
        m
    }
}

/// Fixed parts of the runner command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub interpreter: String,
    pub script_path: String,
    pub config_path: String,
}

impl Default for CommandTemplate {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            script_path: DEFAULT_SCRIPT_PATH.to_string(),
            config_path: DEFAULT_CONFIG_PATH.to_string(),
        }
    }
}

impl CommandTemplate {
    /// `<interpreter> <script> <config> --input-json '<json>'` as a single line.
    pub fn render(&self, input: &RunInput) -> String {
        format!(
            "{} {} {} --input-json {}",
            self.interpreter,
            self.script_path,
            self.config_path,
            shell_single_quote(&input.to_json())
        )
    }
}

/// Wrap `s` in single quotes for a POSIX shell; embedded `'` become `'\''`.
pub fn shell_single_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}
