//! Run executor trait and the simulated default.
//!
//! This module provides a small abstraction (`RunExecutor`) that stands in
//! for running an agent with the user's inputs, plus the default
//! `SimulatedExecutor`, which waits a fixed delay and returns an advisory
//! message instead of starting anything.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::command::RunInput;

pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(1500);

pub const SIMULATED_OUTPUT: &str = "Agent execution simulated. To run for real, use the command shown below in your local terminal (where you have the Python runner and your OpenRouter API key set up).";

/// One accepted trigger, as handed to the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub run_id: Uuid,
    pub input: RunInput,
    /// The command line shown to the user for this run.
    pub command: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RunError {
    #[error("{0}")]
    Failed(String),
}

#[async_trait]
pub trait RunExecutor: Send + Sync {
    /// Execute one run and return the message to show as its output.
    ///
    /// Errors are reported back into the run panel; they never leave the
    /// simulator busy.
    async fn execute(&self, invocation: &Invocation) -> Result<String, RunError>;
}

/// Default executor: sleeps, then returns [`SIMULATED_OUTPUT`].
pub struct SimulatedExecutor {
    delay: Duration,
}

impl SimulatedExecutor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_DELAY)
    }
}

#[async_trait]
impl RunExecutor for SimulatedExecutor {
    async fn execute(&self, invocation: &Invocation) -> Result<String, RunError> {
        tracing::info!(
            "simulated run: run_id={}, delay_ms={}",
            invocation.run_id,
            self.delay.as_millis()
        );
        tokio::time::sleep(self.delay).await;
        Ok(SIMULATED_OUTPUT.to_string())
    }
}
