// ============================================
// src/config.rs
// Settings: config file + command line
// ============================================

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::session::DEFAULT_ROUND_SECONDS;

const CONFIG_FILE: &str = "config.json";

/// Command line. Every flag overrides the matching config file value.
#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "wortblitz",
    version,
    about = "Translate German words into English before the clock runs out."
)]
pub struct Cli {
    /// Vocabulary JSON file to use instead of the built-in word list
    #[arg(long, value_name = "PATH")]
    pub vocabulary: Option<PathBuf>,

    /// Length of a round in seconds
    #[arg(long, value_name = "SECONDS")]
    pub round_seconds: Option<u32>,

    /// Seed for word selection (same seed, same word order)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config file to read instead of the per-user one
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "wortblitz=trace"
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Validate the vocabulary, print a summary and exit
    #[arg(long)]
    pub check: bool,
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub vocabulary: Option<PathBuf>,
    pub round_seconds: u32,
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary: None,
            round_seconds: DEFAULT_ROUND_SECONDS,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Per-user directories for this app
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("de", "wortblitz", "WORTBLITZ")
    }

    /// `<config dir>/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Where log files go
    pub fn log_dir() -> PathBuf {
        match Self::project_dirs() {
            Some(dirs) => dirs.data_dir().join("logs"),
            // no home directory; fall back to the working directory
            None => PathBuf::from("logs"),
        }
    }

    /// Read a config file. A relative `vocabulary` path is taken relative
    /// to the file itself.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(dir) = path.parent() {
            config.vocabulary = config
                .vocabulary
                .map(|vocab| if vocab.is_relative() { dir.join(vocab) } else { vocab });
        }
        Ok(config)
    }

    /// Explicit file must exist; the per-user file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(path) = &cli.vocabulary {
            self.vocabulary = Some(path.clone());
        }
        if let Some(seconds) = cli.round_seconds {
            self.round_seconds = seconds;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        self
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.round_seconds == 0 {
            return Err(ConfigError::ZeroRoundLength);
        }
        Ok(self)
    }

    /// Config file, then command line, then checks
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        Self::load(cli.config.as_deref())?.apply_cli(cli).validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.round_seconds, 180);
        assert_eq!(config.vocabulary, None);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"seed": 9}"#);

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.round_seconds, 180);
    }

    #[test]
    fn test_relative_vocabulary_is_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"vocabulary": "words.json"}"#);

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.vocabulary, Some(dir.path().join("words.json")));
    }

    #[test]
    fn test_bad_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"round_secs": 60}"#);

        match Config::load_from(&path).unwrap_err() {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            Config::load(Some(&missing)).unwrap_err(),
            ConfigError::Io { .. }
        ));
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"round_seconds": 60, "seed": 1, "log_level": "warn"}"#);
        let cli = Cli::parse_from([
            "wortblitz",
            "--config",
            path.to_str().unwrap(),
            "--round-seconds",
            "90",
            "--log-level",
            "debug",
        ]);

        let config = Config::resolve(&cli).unwrap();
        assert_eq!(config.round_seconds, 90);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_zero_round_rejected() {
        let cli = Cli {
            round_seconds: Some(0),
            ..Cli::default()
        };
        assert!(matches!(
            Config::default().apply_cli(&cli).validate().unwrap_err(),
            ConfigError::ZeroRoundLength
        ));
    }
}
