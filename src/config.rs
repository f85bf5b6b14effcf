//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\simplecast-source\config.toml
//! - macOS: ~/Library/Application Support/simplecast-source/config.toml
//! - Linux: ~/.config/simplecast-source/config.toml
//!
//! The config file is human-readable and editable. Command-line flags and
//! the `SIMPLECAST_TOKEN` / `SIMPLECAST_PODCAST_ID` environment variables
//! take precedence over it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::simplecast::{BASE_URL, ClientOptions, FetchLimit};
use crate::source::{CachedImageLinker, SeasonLink, SourceOptions};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials
    pub credentials: Credentials,

    /// Sourcing settings
    pub source: SourceConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Simplecast API token
    pub token: Option<String>,

    /// Podcast to source
    pub podcast_id: Option<String>,
}

/// Sourcing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Page size for episode and season fetches (non-numbers fall back to 10)
    pub fetch_limit: FetchLimit,

    /// Per-request timeout
    pub timeout_secs: u64,

    /// API root
    pub base_url: String,

    /// Prefix for node type names
    pub type_prefix: String,

    /// "key" or "reference"
    pub season_link: SeasonLink,

    /// Download podcast and episode images as file nodes
    pub download_images: bool,

    /// Where downloaded images are kept (default: user cache directory)
    pub image_cache_dir: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            fetch_limit: FetchLimit::default(),
            timeout_secs: 30,
            base_url: BASE_URL.to_string(),
            type_prefix: "Simplecast".to_string(),
            season_link: SeasonLink::Key,
            download_images: true,
            image_cache_dir: None,
        }
    }
}

impl Config {
    /// HTTP client options from the `[source]` section
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.source.base_url.clone(),
            timeout: Duration::from_secs(self.source.timeout_secs),
            ..Default::default()
        }
    }

    /// Sourcing run options from the `[source]` section
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            fetch_limit: self.source.fetch_limit,
            season_link: self.source.season_link,
            attach_images: self.source.download_images,
            type_prefix: self.source.type_prefix.clone(),
        }
    }

    /// Configured image cache, or the default location
    pub fn image_cache_dir(&self) -> PathBuf {
        self.source
            .image_cache_dir
            .clone()
            .unwrap_or_else(CachedImageLinker::default_cache_dir)
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("simplecast-source"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from a specific file
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

/// Save configuration to the default location
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[source]"));
        assert!(toml.contains("fetch_limit = 99"));
        assert!(toml.contains("season_link = \"key\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.credentials.token = Some("secret".to_string());
        config.credentials.podcast_id = Some("pod-1".to_string());
        config.source.season_link = SeasonLink::Reference;
        config.source.image_cache_dir = Some(PathBuf::from("/tmp/images"));

        save_to(&config, &path).unwrap();
        assert!(!path.with_extension("toml.tmp").exists());

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[credentials]
token = "my-token"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.credentials.token.as_deref(), Some("my-token"));
        assert!(config.credentials.podcast_id.is_none());
        assert_eq!(config.source.fetch_limit, FetchLimit::new(99));
        assert_eq!(config.source.timeout_secs, 30);
        assert!(config.source.download_images);
    }

    #[test]
    fn test_non_numeric_fetch_limit_falls_back() {
        let toml = r#"
[source]
fetch_limit = "abc"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.source.fetch_limit, FetchLimit::new(10));

        let config: Config = toml::from_str("[source]\nfetch_limit = \"25\"").unwrap();
        assert_eq!(config.source.fetch_limit, FetchLimit::new(25));
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[source\nbroken").unwrap();

        assert!(matches!(load_from(&path), Err(ConfigError::Parse(..))));
        assert!(matches!(
            load_from(&dir.path().join("missing.toml")),
            Err(ConfigError::Read(..))
        ));
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.source.timeout_secs = 5;
        config.source.base_url = "http://localhost:9000".to_string();
        config.source.download_images = false;
        config.source.type_prefix = "Cast".to_string();

        let client = config.client_options();
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.base_url, "http://localhost:9000");

        let source = config.source_options();
        assert!(!source.attach_images);
        assert_eq!(source.type_prefix, "Cast");
        assert_eq!(source.fetch_limit, FetchLimit::default());
    }
}
