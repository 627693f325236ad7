use std::path::{Path, PathBuf};

use eyre::{Result, bail};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{summarize, youtube};

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub bind: Option<String>,
    pub model: Option<String>,
    pub youtube_base_url: Option<String>,
    pub gemini_base_url: Option<String>,
}

impl Config {
    /// Load config from ~/.config/ytsum/config.toml if it exists; an
    /// unreadable file is logged and replaced by defaults
    pub fn load() -> Self {
        Self::load_or_default(&config_path())
    }

    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config file found at {}", path.display());
            return Config::default();
        }
        Self::load_from(path).unwrap_or_else(|e| {
            warn!("Ignoring config file {}: {e}", path.display());
            Config::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytsum")
        .join("config.toml")
}

/// Effective settings for one process: config file, then CLI overrides,
/// plus the API key read once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: String,
    pub model: String,
    pub api_key: String,
    pub youtube_base_url: String,
    pub gemini_base_url: String,
}

impl Settings {
    pub fn new(config: Config, bind: Option<String>, model: Option<String>, api_key: Option<String>) -> Result<Self> {
        let api_key = match api_key.map(|k| k.trim().to_string()) {
            Some(k) if !k.is_empty() => k,
            _ => bail!("{API_KEY_ENV} environment variable not set (required for Gemini summarization)"),
        };

        Ok(Self {
            bind: bind.or(config.bind).unwrap_or_else(|| DEFAULT_BIND.to_string()),
            model: model
                .or(config.model)
                .unwrap_or_else(|| summarize::DEFAULT_MODEL.to_string()),
            api_key,
            youtube_base_url: config
                .youtube_base_url
                .unwrap_or_else(|| youtube::DEFAULT_BASE_URL.to_string()),
            gemini_base_url: config
                .gemini_base_url
                .unwrap_or_else(|| summarize::DEFAULT_BASE_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
bind = "0.0.0.0:8080"
model = "gemini-2.5-flash"
youtube_base_url = "http://localhost:9000"
gemini_base_url = "http://localhost:9001"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bind.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(config.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(config.youtube_base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.gemini_base_url.as_deref(), Some("http://localhost:9001"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.bind.is_none());
        assert!(config.model.is_none());
    }

    #[test]
    fn test_load_or_default_invalid_file() {
        let path = std::env::temp_dir().join(format!("ytsum-invalid-{}.toml", std::process::id()));
        std::fs::write(&path, "bind = [not toml").unwrap();
        let config = Config::load_or_default(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(config.bind.is_none());
        assert!(config.model.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = std::env::temp_dir().join("ytsum-does-not-exist.toml");
        assert!(Config::load_or_default(&path).bind.is_none());
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::new(Config::default(), None, None, Some("key".to_string())).unwrap();
        assert_eq!(settings.bind, DEFAULT_BIND);
        assert_eq!(settings.model, summarize::DEFAULT_MODEL);
        assert_eq!(settings.youtube_base_url, youtube::DEFAULT_BASE_URL);
        assert_eq!(settings.api_key, "key");
    }

    #[test]
    fn test_settings_cli_overrides_config() {
        let config: Config = toml::from_str(r#"model = "from-file""#).unwrap();
        let settings = Settings::new(config, Some("127.0.0.1:0".to_string()), Some("from-cli".to_string()), Some("key".to_string())).unwrap();
        assert_eq!(settings.model, "from-cli");
        assert_eq!(settings.bind, "127.0.0.1:0");
    }

    #[test]
    fn test_settings_require_api_key() {
        assert!(Settings::new(Config::default(), None, None, None).is_err());
        assert!(Settings::new(Config::default(), None, None, Some("  ".to_string())).is_err());
    }
}
