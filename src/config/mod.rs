//! Runtime configuration: CLI flags over an optional TOML file over defaults.

mod error;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use url::Url;

pub use error::ConfigError;

use crate::form::DEFAULT_SUCCESS_DELAY;
use crate::storage::default_data_dir;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Largest accepted `success_message_secs` (one hour).
pub const MAX_SUCCESS_MESSAGE_SECS: u64 = 3600;

/// Name of the log file written inside the data directory.
const LOG_FILE_NAME: &str = "sectorform.log";

/// Command-line arguments.
#[derive(Debug, Default, Parser)]
#[command(name = "sectorform", version, about)]
pub struct Cli {
    /// Base URL of the REST backend.
    #[arg(long, env = "SECTORFORM_API_URL")]
    pub api_url: Option<String>,

    /// Path to a TOML config file [default: <config dir>/sectorform/config.toml].
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for the remembered submission id and the log file.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Log file path [default: <data dir>/sectorform.log].
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Contents of the optional config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_base_url: Option<String>,
    pub success_message_secs: Option<u64>,
}

impl FileConfig {
    /// Parses a config file.
    ///
    /// A missing file at the default location is not an error; a missing
    /// file that was asked for explicitly is.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: Url,
    pub success_delay: Duration,
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl Config {
    /// Resolves configuration from parsed arguments, reading the config file
    /// and platform directories as needed.
    pub fn resolve(cli: Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path, true)?,
            None => match default_config_path() {
                Some(path) => FileConfig::load(&path, false)?,
                None => FileConfig::default(),
            },
        };
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        Self::from_parts(cli, file, data_dir)
    }

    /// Merges CLI flags over file settings over defaults.
    pub fn from_parts(cli: Cli, file: FileConfig, data_dir: PathBuf) -> Result<Self, ConfigError> {
        let raw_url = cli
            .api_url
            .or(file.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base_url = parse_base_url(&raw_url)?;

        let success_delay = match file.success_message_secs {
            Some(secs) if secs > MAX_SUCCESS_MESSAGE_SECS => {
                return Err(ConfigError::SuccessDelayTooLong {
                    secs,
                    max: MAX_SUCCESS_MESSAGE_SECS,
                });
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_SUCCESS_DELAY,
        };
        let log_file = cli
            .log_file
            .unwrap_or_else(|| data_dir.join(LOG_FILE_NAME));

        Ok(Self {
            api_base_url,
            success_delay,
            data_dir,
            log_file,
            verbose: cli.verbose,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::BaseUrlSuffix(raw.to_string()));
    }
    Ok(url)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sectorform").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_dir() -> PathBuf {
        PathBuf::from("/tmp/sectorform-test")
    }

    #[test]
    fn defaults_apply_when_nothing_set() {
        let config = Config::from_parts(Cli::default(), FileConfig::default(), data_dir()).unwrap();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8080/api");
        assert_eq!(config.success_delay, Duration::from_secs(5));
        assert_eq!(config.log_file, data_dir().join("sectorform.log"));
        assert!(!config.verbose);
    }

    #[test]
    fn file_overrides_defaults() {
        let file = FileConfig {
            api_base_url: Some("https://forms.example.com/api".into()),
            success_message_secs: Some(2),
        };
        let config = Config::from_parts(Cli::default(), file, data_dir()).unwrap();
        assert_eq!(config.api_base_url.host_str(), Some("forms.example.com"));
        assert_eq!(config.success_delay, Duration::from_secs(2));
    }

    #[test]
    fn cli_overrides_file() {
        let cli = Cli {
            api_url: Some("http://127.0.0.1:9000/api".into()),
            log_file: Some(PathBuf::from("/var/log/sf.log")),
            verbose: true,
            ..Cli::default()
        };
        let file = FileConfig {
            api_base_url: Some("https://forms.example.com/api".into()),
            success_message_secs: None,
        };
        let config = Config::from_parts(cli, file, data_dir()).unwrap();
        assert_eq!(config.api_base_url.port(), Some(9000));
        assert_eq!(config.log_file, PathBuf::from("/var/log/sf.log"));
        assert!(config.verbose);
    }

    #[test]
    fn malformed_url_is_rejected() {
        let cli = Cli {
            api_url: Some("not a url".into()),
            ..Cli::default()
        };
        let err = Config::from_parts(cli, FileConfig::default(), data_dir()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let cli = Cli {
            api_url: Some("ftp://example.com/api".into()),
            ..Cli::default()
        };
        let err = Config::from_parts(cli, FileConfig::default(), data_dir()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(s) if s == "ftp"));
    }

    #[test]
    fn base_url_with_query_is_rejected() {
        let cli = Cli {
            api_url: Some("http://h/api?x=1".into()),
            ..Cli::default()
        };
        let err = Config::from_parts(cli, FileConfig::default(), data_dir()).unwrap_err();
        assert!(matches!(err, ConfigError::BaseUrlSuffix(_)));
    }

    #[test]
    fn base_url_with_fragment_is_rejected() {
        let file = FileConfig {
            api_base_url: Some("http://h/api#top".into()),
            success_message_secs: None,
        };
        let err = Config::from_parts(Cli::default(), file, data_dir()).unwrap_err();
        assert!(matches!(err, ConfigError::BaseUrlSuffix(_)));
    }

    #[test]
    fn oversized_success_delay_is_rejected() {
        let file = FileConfig {
            api_base_url: None,
            success_message_secs: Some(u64::MAX),
        };
        let err = Config::from_parts(Cli::default(), file, data_dir()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::SuccessDelayTooLong { secs: u64::MAX, max: MAX_SUCCESS_MESSAGE_SECS }
        ));
    }

    #[test]
    fn success_delay_at_limit_is_accepted() {
        let file = FileConfig {
            api_base_url: None,
            success_message_secs: Some(MAX_SUCCESS_MESSAGE_SECS),
        };
        let config = Config::from_parts(Cli::default(), file, data_dir()).unwrap();
        assert_eq!(config.success_delay, Duration::from_secs(MAX_SUCCESS_MESSAGE_SECS));
    }

    #[test]
    fn load_parses_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "api_base_url = \"http://backend:8080/api\"\nsuccess_message_secs = 10\n",
        )
        .unwrap();
        let file = FileConfig::load(&path, true).unwrap();
        assert_eq!(file.api_base_url.as_deref(), Some("http://backend:8080/api"));
        assert_eq!(file.success_message_secs, Some(10));
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"http://x\"\n").unwrap();
        assert!(matches!(
            FileConfig::load(&path, true),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_optional_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = FileConfig::load(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(file, FileConfig::default());
    }

    #[test]
    fn missing_required_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FileConfig::load(&dir.path().join("absent.toml"), true),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "sectorform",
            "--api-url",
            "http://h/api",
            "--data-dir",
            "/d",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://h/api"));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/d")));
        assert!(cli.verbose);
    }
}
