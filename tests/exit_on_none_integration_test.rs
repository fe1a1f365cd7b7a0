//! None-guard integration tests
//!
//! Exiting tests re-run this test binary with a single child test selected
//! and inspect the child's exit status and stderr.

use call_log::decorators::{exit_on_none, ExitOnNone, NONE_EXIT_CODE};
use call_log::observability::{build_subscriber, MemoryWriter, Severity};
use call_log::signature;
use std::env;
use std::process::{Command, Output};
use tracing_subscriber::EnvFilter;

const CHILD_VAR: &str = "CALL_LOG_EXIT_CHILD";

fn in_child() -> bool {
    env::var_os(CHILD_VAR).is_some()
}

fn run_child(test_name: &str) -> Output {
    let exe = env::current_exe().unwrap();
    Command::new(exe)
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_VAR, "1")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn expected_status() -> i32 {
    if cfg!(unix) {
        // Only the low byte of the status survives on unix.
        NONE_EXIT_CODE & 0xff
    } else {
        NONE_EXIT_CODE
    }
}

#[test]
fn child_default_guard_exits() {
    if !in_child() {
        return;
    }
    let fetch = exit_on_none(signature!(fetch(id)), |(_id,): (u32,)| None::<String>);
    fetch.call((7,));
    unreachable!("guard should have exited");
}

#[test]
fn child_configured_guard_exits() {
    if !in_child() {
        return;
    }
    let lookup = ExitOnNone::new()
        .description("CATALOG")
        .level(Severity::Warn)
        .wrap(signature!(lookup(key)), |(key,): (&str,)| {
            (key == "known").then_some(1)
        });
    assert_eq!(lookup.call(("known",)), 1);
    lookup.call(("missing",));
    unreachable!("guard should have exited");
}

#[test]
fn test_none_exits_with_code_450() {
    if in_child() {
        return;
    }
    let output = run_child("child_default_guard_exits");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(expected_status()), "stderr: {stderr}");
    assert!(stderr.contains(
        "ERROR    EXITING: 'fetch(...)' exitted with a None. Exiting with error code 450."
    ));
    assert!(!stderr.contains("guard should have exited"));
}

#[test]
fn test_configured_description_and_level() {
    if in_child() {
        return;
    }
    let output = run_child("child_configured_guard_exits");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(expected_status()), "stderr: {stderr}");
    assert!(stderr.contains(
        "WARNING  CATALOG: 'lookup(...)' exitted with a None. Exiting with error code 450."
    ));
}

#[test]
fn test_some_returns_inner_value_without_logging() {
    let parse = exit_on_none(signature!(parse(text)), |(text,): (&str,)| {
        text.parse::<i64>().ok()
    });

    let writer = MemoryWriter::new();
    let subscriber = build_subscriber(EnvFilter::new("debug"), writer.clone());
    let value = tracing::subscriber::with_default(subscriber, || parse.call(("0",)));

    assert_eq!(value, 0);
    assert!(writer.lines().is_empty());
}
