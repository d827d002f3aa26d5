use std::io::Write as _;
use std::process::{Command, Output, Stdio};

use sovereign_console::runner::SIMULATED_OUTPUT;

/// Run the console with a scratch home (no simulated delay) and `stdin` piped in.
fn run_console(envs: &[(&str, &str)], stdin: &[u8]) -> Output {
    let home = tempfile::tempdir().expect("tempdir");
    std::fs::write(home.path().join("config.toml"), "[runner]\ndelay_ms = 0\n")
        .expect("write config");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sovereign-console"));
    cmd.env("SOVEREIGN_HOME", home.path())
        .env("RUST_LOG", "warn")
        .env_remove("TRACING_FILTER")
        .env_remove("LOG_TO_FILE")
        .env_remove("AGENT_DEFINITION")
        .env_remove("AGENT_MODEL")
        .env_remove("RUN_NAME")
        .env_remove("RUN_COLOR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (k, v) in envs {
        cmd.env(k, v);
    }
    let mut child = cmd.spawn().expect("spawn console");
    {
        let mut pipe = child.stdin.take().expect("stdin");
        pipe.write_all(stdin).expect("write stdin");
    }
    child.wait_with_output().expect("console output")
}

#[test]
fn both_prompts_read_from_piped_stdin() {
    let out = run_console(&[], b"Ada\nblue\n");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Your Name: Ada"), "stdout: {stdout}");
    assert!(stdout.contains("Favorite Color: blue"), "stdout: {stdout}");
    assert!(stdout.contains(r#"--input-json '{"name":"Ada","color":"blue"}'"#));
    assert!(stdout.contains(SIMULATED_OUTPUT));
    assert!(!stdout.contains("Enter both a name and a favorite color"));
}

#[test]
fn env_inputs_skip_the_prompts() {
    let out = run_console(
        &[
            ("RUN_NAME", "Grace"),
            ("RUN_COLOR", "green"),
            ("AGENT_MODEL", "meta/llama-3"),
        ],
        b"",
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("LLM Model: meta/llama-3"));
    assert!(stdout.contains(r#"--input-json '{"name":"Grace","color":"green"}'"#));
    assert!(stdout.contains(SIMULATED_OUTPUT));
}

#[test]
fn missing_color_leaves_the_run_disabled() {
    let out = run_console(&[], b"Ada\n");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[Run Agent (Simulated)] (disabled)"));
    assert!(stdout.contains("Enter both a name and a favorite color"));
    assert!(!stdout.contains("--input-json"));
}
