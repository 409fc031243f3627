//! Application configuration types.
//!
//! Deserialized from `{data_dir}/config.toml` by the infra loader.
//! Every field has a serde default so a missing or partial file still
//! yields a usable configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Health Buddy backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote reply service settings.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Locale used when a session does not specify one.
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// File name of the translation document inside the data dir.
    #[serde(default = "default_translations_file")]
    pub translations_file: String,

    /// Bind address for the HTTP server.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port for the HTTP server.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            default_locale: default_locale(),
            translations_file: default_translations_file(),
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the remote reply service delegate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Full URL of the remote chat endpoint.
    #[serde(default = "default_remote_url")]
    pub url: String,

    /// Hard bound on a single remote request, in milliseconds.
    #[serde(default = "default_remote_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: default_remote_url(),
            timeout_ms: default_remote_timeout_ms(),
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_translations_file() -> String {
    "translations.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_remote_url() -> String {
    "http://127.0.0.1:8787/api/chat".to_string()
}

fn default_remote_timeout_ms() -> u64 {
    10_000
}
