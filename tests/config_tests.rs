mod support;

use dca_pipeline::adapter::inbound::cli::command::Cli;
use dca_pipeline::adapter::inbound::cli::load_config;
use dca_pipeline::error::{ConfigError, Error};
use dca_pipeline::infrastructure::config::Config;
use clap::Parser;
use support::config::{config_toml, write_file};

const EXAMPLE_CONFIG: &str = include_str!("../dca.example.toml");

#[test]
fn example_config_is_valid() {
    let config = Config::parse_toml_with(EXAMPLE_CONFIG, |_| None).unwrap();

    assert!(config.simulate);
    assert_eq!(config.archive.bucket, "dca-bucket");
    assert_eq!(config.job.name, "process-transactions");
    assert_eq!(config.job.command, None);
    assert_eq!(config.queue.receive_batch_size, 10);
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "dca.toml", &config_toml(dir.path(), true));

    let config = Config::load(&path).unwrap();

    assert_eq!(config.archive.root, dir.path().join("archive"));
    assert_eq!(config.queue.spool_dir, dir.path().join("queue"));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));

    match result {
        Err(Error::Config(ConfigError::ReadFile(_))) => {}
        Err(err) => panic!("Expected read error, got {err}"),
        Ok(_) => panic!("Expected missing file to be rejected"),
    }
}

#[test]
fn config_rejects_missing_job_name() {
    let toml = r#"
[archive]
bucket = "dca-bucket"
"#;

    match Config::parse_toml_with(toml, |_| None) {
        Err(Error::Config(ConfigError::MissingField { field: "job_name" })) => {}
        Err(err) => panic!("Expected missing job name, got {err}"),
        Ok(config) => panic!("Expected rejection, got job {:?}", config.job.name),
    }
}

#[test]
fn config_rejects_zero_deadline() {
    let dir = tempfile::tempdir().unwrap();
    let toml = format!("deadline_secs = 0\n{}", config_toml(dir.path(), true));

    assert!(matches!(
        Config::parse_toml_with(&toml, |_| None),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "deadline_secs",
            ..
        }))
    ));
}

#[test]
fn command_line_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "dca.toml", &config_toml(dir.path(), true));
    let path = path.to_string_lossy().to_string();

    let cli = Cli::try_parse_from(["dca", "reconcile", "--real", "--max", "2", "-v", "-c", &path])
        .unwrap();
    let config = load_config(&cli).unwrap();

    assert!(!config.simulate);
    assert_eq!(config.queue.receive_batch_size, 2);
    assert_eq!(config.logging.level, "debug");
}
