use std::fs;
use std::path::{Path, PathBuf};

use dca_pipeline::infrastructure::config::Config;

/// Minimal valid configuration rooted in `dir`.
pub fn config_toml(dir: &Path, simulate: bool) -> String {
    format!(
        r#"
simulate = {simulate}

[archive]
root = "{root}"
bucket = "dca-bucket"
config_key = "config/dca.json"
pending_prefix = "transactions/pending"
processed_prefix = "transactions/processed"

[queue]
url = "local://pending-orders"
spool_dir = "{spool}"

[job]
name = "process-transactions"
write_operation = "upsert"
"#,
        root = dir.join("archive").display(),
        spool = dir.join("queue").display(),
    )
}

/// Write `contents` to `name` inside `dir`.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

/// Parsed configuration that ignores the process environment.
pub fn test_config(dir: &Path, simulate: bool) -> Config {
    Config::parse_toml_with(&config_toml(dir, simulate), |_| None).expect("valid test config")
}
