//! Run panel state and the trigger flow.

use tokio::sync::watch;
use uuid::Uuid;

use super::executor::{Invocation, RunExecutor};
use crate::command::{CommandTemplate, RunInput};

/// Run panel state.
///
/// `busy` is true exactly while one trigger is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    pub user_name: String,
    pub user_color: String,
    pub busy: bool,
    pub output: Option<String>,
    pub command_preview: Option<String>,
}

impl RunRequest {
    pub fn with_user_name(&self, name: impl Into<String>) -> Self {
        Self {
            user_name: name.into(),
            ..self.clone()
        }
    }

    pub fn with_user_color(&self, color: impl Into<String>) -> Self {
        Self {
            user_color: color.into(),
            ..self.clone()
        }
    }

    /// Whether the run action is enabled.
    pub fn can_trigger(&self) -> bool {
        !self.busy && !self.user_name.is_empty() && !self.user_color.is_empty()
    }

    pub fn input(&self) -> RunInput {
        RunInput {
            name: self.user_name.clone(),
            color: self.user_color.clone(),
        }
    }

    fn started(&self, command: String) -> Self {
        Self {
            busy: true,
            output: None,
            command_preview: Some(command),
            ..self.clone()
        }
    }

    fn finished(&self, output: String) -> Self {
        Self {
            busy: false,
            output: Some(output),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The executor returned and its message is in `output`.
    Completed,
    /// The executor failed; `output` carries the reason.
    Failed,
    /// Busy or missing input; nothing changed.
    NotInvocable,
}

/// Owns the run panel state and drives triggers through an executor.
///
/// State lives in a `watch` channel so a display can re-render on every change.
pub struct RunSimulator {
    state: watch::Sender<RunRequest>,
    template: CommandTemplate,
    executor: Box<dyn RunExecutor>,
}

impl RunSimulator {
    pub fn new(template: CommandTemplate, executor: Box<dyn RunExecutor>) -> Self {
        Self {
            state: watch::Sender::new(RunRequest::default()),
            template,
            executor,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RunRequest> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> RunRequest {
        self.state.borrow().clone()
    }

    pub fn set_user_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.state.send_modify(|r| *r = r.with_user_name(name));
    }

    pub fn set_user_color(&self, color: impl Into<String>) {
        let color = color.into();
        self.state.send_modify(|r| *r = r.with_user_color(color));
    }

    /// Preview the command, run the executor, then publish its message.
    ///
    /// A no-op returning [`TriggerOutcome::NotInvocable`] while busy or when
    /// either input is empty.
    pub async fn trigger(&self) -> TriggerOutcome {
        let mut accepted = None;
        self.state.send_if_modified(|r| {
            if !r.can_trigger() {
                return false;
            }
            let input = r.input();
            let command = self.template.render(&input);
            *r = r.started(command.clone());
            accepted = Some(Invocation {
                run_id: Uuid::new_v4(),
                input,
                command,
            });
            true
        });
        let Some(invocation) = accepted else {
            tracing::debug!("trigger ignored: run action disabled");
            return TriggerOutcome::NotInvocable;
        };

        tracing::info!("run started: run_id={}", invocation.run_id);
        tracing::debug!("command preview: {}", invocation.command);

        let (outcome, message) = match self.executor.execute(&invocation).await {
            Ok(message) => (TriggerOutcome::Completed, message),
            Err(e) => {
                tracing::warn!("run failed: run_id={}, error={}", invocation.run_id, e);
                (TriggerOutcome::Failed, format!("run failed: {e}"))
            }
        };
        self.state.send_modify(|r| *r = r.finished(message));
        tracing::info!(
            "run finished: run_id={}, outcome={:?}",
            invocation.run_id,
            outcome
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::executor::{RunError, SIMULATED_OUTPUT, SimulatedExecutor};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Returns at once and remembers what it was asked to run.
    #[derive(Clone, Default)]
    struct InstantExecutor {
        seen: Arc<Mutex<Vec<Invocation>>>,
    }

    #[async_trait]
    impl RunExecutor for InstantExecutor {
        async fn execute(&self, invocation: &Invocation) -> Result<String, RunError> {
            self.seen.lock().unwrap().push(invocation.clone());
            Ok("done".to_string())
        }
    }

    struct FailingExecutor;

    #[async_trait]
    impl RunExecutor for FailingExecutor {
        async fn execute(&self, _invocation: &Invocation) -> Result<String, RunError> {
            Err(RunError::Failed("runner exited with status 1".into()))
        }
    }

    fn ready(sim: &RunSimulator, name: &str, color: &str) {
        sim.set_user_name(name);
        sim.set_user_color(color);
    }

    #[tokio::test]
    async fn trigger_previews_command_and_publishes_output() {
        let exec = InstantExecutor::default();
        let sim = RunSimulator::new(CommandTemplate::default(), Box::new(exec.clone()));
        ready(&sim, "Ada", "blue");

        assert_eq!(sim.trigger().await, TriggerOutcome::Completed);

        let state = sim.snapshot();
        assert!(!state.busy);
        assert_eq!(state.output.as_deref(), Some("done"));
        let preview = state.command_preview.expect("preview set");
        assert!(preview.contains(r#"--input-json '{"name":"Ada","color":"blue"}'"#));

        let seen = exec.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].command, preview);
        assert_eq!(seen[0].input.name, "Ada");
    }

    #[tokio::test]
    async fn empty_inputs_make_trigger_a_no_op() {
        let exec = InstantExecutor::default();
        let sim = RunSimulator::new(CommandTemplate::default(), Box::new(exec.clone()));

        sim.set_user_color("blue");
        let before = sim.snapshot();
        assert_eq!(sim.trigger().await, TriggerOutcome::NotInvocable);
        assert_eq!(sim.snapshot(), before);

        sim.set_user_name("Ada");
        sim.set_user_color("");
        let before = sim.snapshot();
        assert_eq!(sim.trigger().await, TriggerOutcome::NotInvocable);
        assert_eq!(sim.snapshot(), before);
        assert!(exec.seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn busy_spans_the_simulated_delay() {
        let sim = RunSimulator::new(
            CommandTemplate::default(),
            Box::new(SimulatedExecutor::default()),
        );
        ready(&sim, "Ada", "blue");
        let rx = sim.subscribe();
        assert!(!rx.borrow().busy);

        let start = tokio::time::Instant::now();
        let (outcome, during) = tokio::join!(sim.trigger(), async {
            tokio::task::yield_now().await;
            rx.borrow().clone()
        });

        assert!(during.busy);
        assert_eq!(during.output, None);
        assert!(during.command_preview.is_some());
        assert_eq!(outcome, TriggerOutcome::Completed);
        assert!(start.elapsed() >= Duration::from_millis(1500));

        let after = sim.snapshot();
        assert!(!after.busy);
        assert_eq!(after.output.as_deref(), Some(SIMULATED_OUTPUT));
    }

    #[tokio::test(start_paused = true)]
    async fn second_trigger_while_busy_is_ignored() {
        let sim = RunSimulator::new(
            CommandTemplate::default(),
            Box::new(SimulatedExecutor::default()),
        );
        ready(&sim, "Ada", "blue");

        let (first, (second, before, after)) = tokio::join!(sim.trigger(), async {
            tokio::task::yield_now().await;
            let before = sim.snapshot();
            let outcome = sim.trigger().await;
            (outcome, before, sim.snapshot())
        });
        assert_eq!(first, TriggerOutcome::Completed);
        assert_eq!(second, TriggerOutcome::NotInvocable);
        assert!(before.busy);
        assert_eq!(after, before);
    }

    #[tokio::test(start_paused = true)]
    async fn input_edits_during_a_run_do_not_touch_the_preview() {
        let sim = RunSimulator::new(
            CommandTemplate::default(),
            Box::new(SimulatedExecutor::default()),
        );
        ready(&sim, "Ada", "blue");

        let (outcome, ()) = tokio::join!(sim.trigger(), async {
            tokio::task::yield_now().await;
            sim.set_user_name("Grace");
        });
        assert_eq!(outcome, TriggerOutcome::Completed);

        let state = sim.snapshot();
        assert_eq!(state.user_name, "Grace");
        assert!(state.command_preview.unwrap().contains(r#""name":"Ada""#));
    }

    #[tokio::test]
    async fn executor_failure_is_reported_and_clears_busy() {
        let sim = RunSimulator::new(CommandTemplate::default(), Box::new(FailingExecutor));
        ready(&sim, "Ada", "blue");

        assert_eq!(sim.trigger().await, TriggerOutcome::Failed);
        let state = sim.snapshot();
        assert!(!state.busy);
        assert_eq!(
            state.output.as_deref(),
            Some("run failed: runner exited with status 1")
        );
        assert!(state.command_preview.is_some());
        assert!(state.can_trigger());
    }

    #[test]
    fn setters_return_new_records() {
        let r = RunRequest::default();
        let named = r.with_user_name("Ada");
        assert_eq!(r.user_name, "");
        assert_eq!(named.user_name, "Ada");
        assert!(!named.can_trigger());
        assert!(named.with_user_color("blue").can_trigger());
    }
}
