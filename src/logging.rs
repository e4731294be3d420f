use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "student-records.log";

/// Install a `tracing` subscriber that appends to `<log_dir>/student-records.log`.
/// The filter comes from `RUST_LOG` and defaults to `info`. Logs go to a file so
/// they never interleave with the interactive prompt.
pub fn init_logging(log_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = log_dir.ok_or_else(|| anyhow!("could not locate home directory"))?;
    fs::create_dir_all(dir).context("failed to create log directory")?;

    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context("failed to open log file")?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;

    Ok(path)
}
