use std::path::PathBuf;

use anyhow::Context as _;
use env_flags::env_flags;
use once_cell::sync::OnceCell;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use sovereign_console::config::{RunnerCfg, UserConfig, expand_home, load_user_config};
use sovereign_console::model::{AgentConfig, ConfigField, ConfigModel};
use sovereign_console::parser::load_definition;
use sovereign_console::render::{config_panel, run_panel};
use sovereign_console::runner::{RunSimulator, SimulatedExecutor, TriggerOutcome};
use sovereign_console::template::{check_inputs, fill_prompt, missing_placeholders};

#[derive(Clone, Copy)]
enum LogStyle {
    Json,
    Compact,
    Pretty,
    Full,
}

fn fmt_layer<S, W>(writer: W, ansi: bool, style: LogStyle) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer);
    match style {
        LogStyle::Json => base.json().boxed(),
        LogStyle::Compact => base.compact().boxed(),
        LogStyle::Pretty => base.pretty().boxed(),
        LogStyle::Full => base.boxed(),
    }
}

fn resolve_home(explicit: &str) -> PathBuf {
    if !explicit.is_empty() {
        return expand_home(explicit);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".sovereign");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".sovereign")
}

fn init_tracing(home: &std::path::Path, user_cfg: Option<&UserConfig>) {
    env_flags! {
        /// Tracing filter, e.g. "info", "debug", or targets format.
        RUST_LOG: &str = "info";
        /// Preferred filter env (alias). If set, overrides RUST_LOG.
        TRACING_FILTER: &str = "";
        /// Pretty formatting for logs (ignored if TRACING_JSON=true).
        TRACING_PRETTY: bool = false;
        /// Compact single-line formatting for logs (ignored if TRACING_JSON=true)
        TRACING_COMPACT: bool = true;
        /// JSON formatting for logs
        TRACING_JSON: bool = false;
        /// If true, also log to file under <SOVEREIGN_HOME>/logs or LOG_DIR
        LOG_TO_FILE: bool = false;
        /// Optional explicit log directory. Defaults to <SOVEREIGN_HOME>/logs
        LOG_DIR: &str = "";
    }

    let env_set = |k: &str| std::env::var_os(k).is_some();

    let mut level = if !(*TRACING_FILTER).is_empty() {
        (*TRACING_FILTER).to_string()
    } else {
        (*RUST_LOG).to_string()
    };
    let mut json = *TRACING_JSON;
    let mut compact = *TRACING_COMPACT;
    let mut pretty = *TRACING_PRETTY;
    let mut to_file = *LOG_TO_FILE;
    let mut log_dir: Option<PathBuf> = if !(*LOG_DIR).is_empty() {
        Some(expand_home(*LOG_DIR))
    } else {
        None
    };

    // Env wins; user config fills in what env leaves unset.
    if let Some(cfg) = user_cfg.and_then(|c| c.logging.as_ref()) {
        if !(env_set("TRACING_FILTER") || env_set("RUST_LOG"))
            && let Some(l) = cfg.level.as_ref()
        {
            level = l.clone();
        }
        if !env_set("TRACING_JSON")
            && let Some(v) = cfg.json
        {
            json = v;
        }
        if !env_set("TRACING_COMPACT")
            && let Some(v) = cfg.compact
        {
            compact = v;
        }
        if !env_set("TRACING_PRETTY")
            && let Some(v) = cfg.pretty
        {
            pretty = v;
        }
        if !env_set("LOG_TO_FILE")
            && let Some(v) = cfg.to_file
        {
            to_file = v;
        }
        if !env_set("LOG_DIR")
            && let Some(dir) = cfg.dir.as_ref()
        {
            log_dir = Some(expand_home(dir));
        }
    }

    let style = if json {
        LogStyle::Json
    } else if compact {
        LogStyle::Compact
    } else if pretty {
        LogStyle::Pretty
    } else {
        LogStyle::Full
    };

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr; stdout carries the panels.
    let reg = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(std::io::stderr, true, style));

    static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();
    let mut dir_error = None;
    let file_layer = if to_file {
        let dir = log_dir.unwrap_or_else(|| home.join("logs"));
        match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&dir, "sovereign-console.log");
                let (nb, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                Some(fmt_layer(nb, false, style))
            }
            Err(e) => {
                dir_error = Some((dir, e));
                None
            }
        }
    } else {
        None
    };

    if let Err(e) = reg.with(file_layer).try_init() {
        tracing::debug!("tracing already set: {:?}", e);
    }
    if let Some((dir, e)) = dir_error {
        tracing::warn!("failed to create log dir {}: {}", dir.display(), e);
    }
}

async fn prompt_line(input: &mut Lines<BufReader<Stdin>>, label: &str) -> anyhow::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{label}: ").as_bytes()).await?;
    stdout.flush().await?;
    let line = input
        .next_line()
        .await
        .context("failed to read from stdin")?
        .unwrap_or_default();
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_flags! {
        /// Console home directory. Defaults to $HOME/.sovereign
        SOVEREIGN_HOME: &str = "";
        /// Optional agent definition (*.agent.yaml) seeding the configuration panel.
        AGENT_DEFINITION: &str = "";
        /// Model identifier override applied to the configuration.
        AGENT_MODEL: &str = "";
        /// Run inputs. Prompted on stdin when empty.
        RUN_NAME: &str = "";
        RUN_COLOR: &str = "";
    }

    let home = resolve_home(*SOVEREIGN_HOME);
    let user_cfg = match load_user_config(&home) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ignoring unreadable {}/config.toml: {e}", home.display());
            None
        }
    };
    init_tracing(&home, user_cfg.as_ref());
    tracing::info!("starting sovereign-console (home={})", home.display());

    let runner_cfg = user_cfg
        .as_ref()
        .and_then(|c| c.runner.as_ref())
        .map(|r| (r.command_template(), r.delay()))
        .unwrap_or_else(|| {
            let r = RunnerCfg::default();
            (r.command_template(), r.delay())
        });
    let (template, delay) = runner_cfg;

    let (seed, input_schema) = if (*AGENT_DEFINITION).is_empty() {
        (AgentConfig::simple_greeter(), None)
    } else {
        let path = expand_home(*AGENT_DEFINITION);
        let def = load_definition(&path)
            .with_context(|| format!("loading agent definition {}", path.display()))?;
        (def.config, Some(def.input_schema))
    };

    let mut model = ConfigModel::new(seed);
    if !(*AGENT_MODEL).is_empty() {
        model = model.update_field(ConfigField::ModelIdentifier, *AGENT_MODEL);
    }
    let cfg = model.config();
    println!("{}", config_panel(cfg));

    let missing = missing_placeholders(&cfg.prompt_template, &["name", "color"]);
    if !missing.is_empty() {
        tracing::warn!(
            "prompt template no longer contains placeholder(s): {}",
            missing.join(", ")
        );
    }

    let sim = RunSimulator::new(template, Box::new(SimulatedExecutor::new(delay)));
    // One reader for both prompts so buffered piped input is not lost.
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let name = if (*RUN_NAME).is_empty() {
        prompt_line(&mut input, "Your Name").await?
    } else {
        (*RUN_NAME).to_string()
    };
    let color = if (*RUN_COLOR).is_empty() {
        prompt_line(&mut input, "Favorite Color").await?
    } else {
        (*RUN_COLOR).to_string()
    };
    sim.set_user_name(name);
    sim.set_user_color(color);

    let state = sim.snapshot();
    if let Some(schema) = input_schema.as_ref()
        && let Err(e) = check_inputs(schema, &state.input().to_json_map())
    {
        tracing::warn!("{}", e);
    }
    tracing::debug!(
        "filled prompt: {}",
        fill_prompt(&cfg.prompt_template, &state.input().to_json_map())
    );

    // Show the running state while the trigger is in flight.
    let mut rx = sim.subscribe();
    let agent_name = cfg.name.clone();
    let display = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            if state.busy {
                println!("{}", run_panel(&agent_name, &state));
            }
        }
    });

    let outcome = sim.trigger().await;
    println!("{}", run_panel(&cfg.name, &sim.snapshot()));
    if outcome == TriggerOutcome::NotInvocable {
        println!("Enter both a name and a favorite color to run the agent.");
    }
    drop(sim);
    display.await.context("display task failed")?;
    tracing::info!("sovereign-console finished (outcome={:?})", outcome);
    Ok(())
}
