use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::command::CommandTemplate;
use crate::runner::DEFAULT_SIMULATED_DELAY;

#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    pub logging: Option<LoggingCfg>,
    pub runner: Option<RunnerCfg>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingCfg {
    pub to_file: Option<bool>,
    pub dir: Option<String>,
    pub json: Option<bool>,
    pub compact: Option<bool>,
    pub pretty: Option<bool>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunnerCfg {
    pub interpreter: Option<String>,
    pub script_path: Option<String>,
    pub config_path: Option<String>,
    pub delay_ms: Option<u64>,
}

impl RunnerCfg {
    /// Command template with any configured parts replacing the defaults.
    pub fn command_template(&self) -> CommandTemplate {
        let d = CommandTemplate::default();
        CommandTemplate {
            interpreter: self.interpreter.clone().unwrap_or(d.interpreter),
            script_path: self.script_path.clone().unwrap_or(d.script_path),
            config_path: self.config_path.clone().unwrap_or(d.config_path),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SIMULATED_DELAY)
    }
}

pub fn parse_user_config(s: &str) -> anyhow::Result<UserConfig> {
    Ok(toml::from_str(s)?)
}

pub fn load_user_config(home: &Path) -> anyhow::Result<Option<UserConfig>> {
    let path = home.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path)?;
    Ok(Some(parse_user_config(&s)?))
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}
