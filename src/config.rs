//! Runtime configuration assembled from command-line flags, then environment
//! variables, then defaults.

use std::path::PathBuf;

use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".student-records";
/// CSV file EXPORT writes when the user just presses Enter.
pub const DEFAULT_EXPORT_PATH: &str = "data.csv";

pub const ENV_LOG_DIR: &str = "STUDENT_RECORDS_LOG_DIR";
pub const ENV_EXPORT_PATH: &str = "STUDENT_RECORDS_EXPORT";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

#[derive(Debug, Default, Parser)]
#[command(
    name = "student-records",
    version,
    about = "Interactive manager for tab-delimited student record files"
)]
pub struct Cli {
    /// Database file to open before the first prompt.
    pub file: Option<String>,
    /// Default CSV path used by EXPORT.
    #[arg(long, value_name = "PATH")]
    pub export_path: Option<String>,
    /// Directory the log file is written to.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
    /// Print status messages without colour.
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub startup_file: Option<String>,
    pub export_path: String,
    /// `None` when no home directory can be found and none was given.
    pub log_dir: Option<PathBuf>,
    pub color: bool,
}

impl Config {
    /// Resolve against the process environment.
    pub fn load(cli: Cli) -> Self {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    /// Flags win over the environment, which wins over defaults. Blank
    /// environment values count as unset.
    pub fn resolve<F>(cli: Cli, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let export_path = cli
            .export_path
            .or_else(|| env(ENV_EXPORT_PATH))
            .unwrap_or_else(|| DEFAULT_EXPORT_PATH.to_string());
        let log_dir = cli
            .log_dir
            .or_else(|| env(ENV_LOG_DIR).map(PathBuf::from))
            .or_else(default_data_dir);
        let color = !cli.no_color && env(ENV_NO_COLOR).is_none();

        Self {
            startup_file: cli.file,
            export_path,
            log_dir,
            color,
        }
    }
}

/// `~/.student-records`, when a home directory exists.
fn default_data_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let config = Config::resolve(Cli::default(), env_of(&[]));
        assert_eq!(config.export_path, DEFAULT_EXPORT_PATH);
        assert!(config.color);
        assert_eq!(config.startup_file, None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let env = env_of(&[
            (ENV_EXPORT_PATH, "out/records.csv"),
            (ENV_LOG_DIR, "/tmp/records-logs"),
            (ENV_NO_COLOR, "1"),
        ]);
        let config = Config::resolve(Cli::default(), env);
        assert_eq!(config.export_path, "out/records.csv");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/records-logs")));
        assert!(!config.color);
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::parse_from([
            "student-records",
            "class.txt",
            "--export-path",
            "mine.csv",
            "--log-dir",
            "logs",
        ]);
        let env = env_of(&[(ENV_EXPORT_PATH, "theirs.csv"), (ENV_LOG_DIR, "elsewhere")]);
        let config = Config::resolve(cli, env);
        assert_eq!(config.startup_file.as_deref(), Some("class.txt"));
        assert_eq!(config.export_path, "mine.csv");
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let config = Config::resolve(Cli::default(), env_of(&[(ENV_EXPORT_PATH, "  ")]));
        assert_eq!(config.export_path, DEFAULT_EXPORT_PATH);
    }
}
