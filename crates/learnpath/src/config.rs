//! Configuration for the roadmap service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Gemini backend configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// YouTube lookup configuration
    #[serde(default)]
    pub youtube: YouTubeConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let mut config: AppConfig = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;
        config.apply_env();
        Ok(config)
    }

    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Pull secrets and common overrides from the environment
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.gemini.api_key = key;
        }
        if let Ok(key) = std::env::var("YOUTUBE_API_KEY") {
            self.youtube.api_key = key;
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Maximum upload size in bytes (default: 25MB)
    pub max_upload_size: usize,
    /// Overall deadline for one ingestion request in seconds
    pub ingest_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_size: 25 * 1024 * 1024,
            ingest_timeout_secs: 600,
        }
    }
}

/// Gemini backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key (normally from GEMINI_API_KEY)
    #[serde(default)]
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Model used for document-grounded roadmap generation
    pub roadmap_model: String,
    /// Model used for one-shot text generation
    pub content_model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling parameter
    pub top_p: f32,
    /// Top-k sampling parameter
    pub top_k: u32,
    /// Output token ceiling
    pub max_output_tokens: u32,
    /// Seconds to wait between upload readiness polls
    pub poll_interval_secs: u64,
    /// Maximum readiness polls before giving up
    pub max_poll_attempts: u32,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            roadmap_model: "gemini-1.5-flash-8b".to_string(),
            content_model: "gemini-1.5-flash".to_string(),
            temperature: 0.2,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            poll_interval_secs: 10,
            max_poll_attempts: 30,
            request_timeout_secs: 120,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("learnpath.db"),
        }
    }
}

/// YouTube lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    /// API key (normally from YOUTUBE_API_KEY)
    #[serde(default)]
    pub api_key: String,
    /// Search API base URL
    pub base_url: String,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_reference_poll_interval() {
        let config = GeminiConfig::default();
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.max_poll_attempts, 30);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = AppConfig::default();
        let raw = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.gemini.roadmap_model, config.gemini.roadmap_model);
    }
}
