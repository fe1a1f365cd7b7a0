//! Configuration integration tests
//!
//! The process-wide setup can only be applied once, so the test that
//! configures it runs in a re-executed copy of this binary.

use call_log::config::{ConfigurationLoader, EnvironmentLoader, LOG_FILE_VAR, LOG_LEVEL_VAR};
use call_log::observability::{build_subscriber, configured_settings, MemoryWriter, Severity};
use call_log::signature;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

const CHILD_CONFIG_VAR: &str = "CALL_LOG_CONFIG_CHILD";

const CONFIG: &str = r#"
[logging]
log_level = "DEBUG"
honor_rust_log = false

[call_log]
description = "nightly sync"
level = "DEBUG"

[exit_on_none]
description = "SYNC"
level = "WARNING"
"#;

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("call_log.toml");
    fs::write(&path, CONFIG).unwrap();
    path
}

#[test]
fn test_sections_build_wrapper_options() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ConfigurationLoader::new(Some(write_config(&dir).as_path())).unwrap();

    let settings = loader.log_settings();
    assert_eq!(settings.level, Severity::Debug);
    assert!(!settings.honor_rust_log);
    assert!(settings.log_file.is_none());

    let call_log = loader.call_log();
    assert_eq!(call_log.description_label(), "nightly sync");
    assert_eq!(call_log.severity(), Severity::Debug);
    assert!(call_log.trims());

    let exit = loader.exit_on_none();
    assert_eq!(
        exit.exit_message("sync"),
        "SYNC: 'sync(...)' exitted with a None. Exiting with error code 450."
    );
}

#[test]
fn test_configured_wrappers_compose() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ConfigurationLoader::new(Some(write_config(&dir).as_path())).unwrap();

    let guarded = loader
        .exit_on_none()
        .wrap(signature!(sync(batch)), |(batch,): (u32,)| Some(batch * 10));
    let logged = loader
        .call_log()
        .wrap(signature!(sync(batch)), move |args: (u32,)| guarded.call(args));

    let writer = MemoryWriter::new();
    let subscriber = build_subscriber(EnvFilter::new("debug"), writer.clone());
    let rows = tracing::subscriber::with_default(subscriber, || logged.call((4,)));

    let lines = writer.lines();
    assert_eq!(rows, 40);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("DEBUG    nightly sync: sync(batch=4)"));
    assert!(lines[1].ends_with("DEBUG    nightly sync: sync(batch=4) completed successfully!"));
}

/// Applies the loaded configuration as the process-wide setup.
#[test]
fn child_applies_file_configuration() {
    let Some(config_path) = env::var_os(CHILD_CONFIG_VAR) else {
        return;
    };

    let mut loader = ConfigurationLoader::new(Some(Path::new(&config_path))).unwrap();
    EnvironmentLoader::default().apply(&mut loader.config.logging);
    assert!(loader.init_logging().unwrap());
    assert!(!loader.init_logging().unwrap());
    assert_eq!(configured_settings(), Some(&loader.log_settings()));

    let step = loader
        .call_log()
        .wrap(signature!(step(name)), |(name,): (&str,)| name.len());
    assert_eq!(step.call(("extract",)), 7);

    let provider = loader.logger_provider();
    provider.get_logger(Some("ingest")).debug("below the WARN threshold");
    provider.get_logger(Some("ingest")).warn("kept");
}

#[test]
fn test_file_configuration_with_environment_overrides() {
    if env::var_os(CHILD_CONFIG_VAR).is_some() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir);
    let log_path = dir.path().join("logs").join("calls.log");

    let output = Command::new(env::current_exe().unwrap())
        .args([
            "child_applies_file_configuration",
            "--exact",
            "--nocapture",
            "--test-threads=1",
        ])
        .env(CHILD_CONFIG_VAR, &config_path)
        .env(LOG_LEVEL_VAR, "WARN")
        .env(LOG_FILE_VAR, &log_path)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "child failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let contents = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    // The environment raised the threshold above the DEBUG call lines.
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with("WARNING  kept"));
}
