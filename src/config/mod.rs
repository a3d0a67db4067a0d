//! Configuration management.
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML
//! file, and `SCHOLARSIFT_*` environment variables (`__` separates the
//! section from the key).
//!
//! # Configuration File Format
//!
//! ```toml
//! [feed]
//! endpoint = "http://export.arxiv.org/api/query"
//! timeout_secs = 15
//!
//! [export]
//! output_dir = "outputs"
//! base_name = "scholarsift_export"
//! log_file = "scholarsift_export_log.json"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 7860
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! ```bash
//! export SCHOLARSIFT_SERVER__PORT=8080
//! export SCHOLARSIFT_EXPORT__OUTPUT_DIR=/tmp/papers
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::feed::ARXIV_API_URL;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SCHOLARSIFT";

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "scholarsift.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Paper feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Web form settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Paper feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Atom query endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom user agent (defaults to `scholarsift/<version>`)
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

fn default_endpoint() -> String {
    ARXIV_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving exported documents
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name (without extension) shared by every format
    #[serde(default = "default_base_name")]
    pub base_name: String,

    /// JSON file recording the latest export
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Trailing line appended to text, Word and PDF exports
    #[serde(default = "default_watermark")]
    pub watermark: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            base_name: default_base_name(),
            log_file: default_log_file(),
            watermark: default_watermark(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_base_name() -> String {
    "scholarsift_export".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("scholarsift_export_log.json")
}

fn default_watermark() -> String {
    crate::export::DEFAULT_WATERMARK.to_string()
}

/// Web form configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    7860
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `"json"` for structured output, anything else for human-readable lines
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a TOML file, creating its directory
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// `SCHOLARSIFT_<SECTION>__<KEY>` variables
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn build(file: Option<&Path>, env: config::Environment) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = file {
        builder = builder.add_source(config::File::from(path));
    }
    let settings = builder.add_source(env).build()?;
    Ok(settings.try_deserialize()?)
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    build(Some(path), environment())
}

/// Get the configuration from defaults and environment variables only
pub fn get_config() -> Result<Config, ConfigError> {
    build(None, environment())
}

/// Default per-user config file location
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scholarsift").join("config.toml"))
}

/// Find the first existing config file: `./scholarsift.toml`, then the user config
pub fn find_config_file() -> Option<PathBuf> {
    std::iter::once(PathBuf::from(LOCAL_CONFIG_FILE))
        .chain(user_config_path())
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.feed.endpoint, "http://export.arxiv.org/api/query");
        assert_eq!(config.feed.timeout_secs, 15);
        assert_eq!(config.export.output_dir, PathBuf::from("outputs"));
        assert_eq!(config.export.base_name, "scholarsift_export");
        assert_eq!(config.server.port, 7860);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_file_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(
            &path,
            r#"
[feed]
timeout_secs = 5

[export]
output_dir = "/tmp/exports"
base_name = "papers"

[server]
port = 9000
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.feed.timeout_secs, 5);
        assert_eq!(config.feed.endpoint, ARXIV_API_URL);
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.export.base_name, "papers");
        assert_eq!(config.export.log_file, PathBuf::from("scholarsift_export_log.json"));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.server.port = 8123;
        config.logging.format = Some("json".to_string());
        config.save(&path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.server.port, 8123);
        assert_eq!(loaded.logging.format.as_deref(), Some("json"));
        assert_eq!(loaded.export.watermark, config.export.watermark);
    }

    fn vars(pairs: &[(&str, &str)]) -> config::Environment {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_env_overrides_use_single_underscore_after_prefix() {
        let config = build(
            None,
            vars(&[
                ("SCHOLARSIFT_SERVER__PORT", "8080"),
                ("SCHOLARSIFT_EXPORT__OUTPUT_DIR", "/tmp/papers"),
                ("SCHOLARSIFT_FEED__TIMEOUT_SECS", "30"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/papers"));
        assert_eq!(config.feed.timeout_secs, 30);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\nhost = \"127.0.0.1\"\n").unwrap();

        let config = build(Some(&path), vars(&[("SCHOLARSIFT_SERVER__PORT", "9100")])).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_config_file_nonexistent() {
        let result = load_config(Path::new("/nonexistent/scholarsift.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_file_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(&path).is_err());
    }
}
