// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub api: ApiConfig,
    pub health: HealthConfig,
    /// Entities exposed through the get-by-id endpoint
    #[serde(default)]
    pub entities: Vec<EntityConfig>,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Output format of the tracing subscriber (text or json)
    #[serde(default)]
    pub format: LogFormat,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// HTTP keep-alive switch: `0` disables it, any other value enables it
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

impl PerformanceConfig {
    pub const fn keep_alive_enabled(&self) -> bool {
        self.keep_alive_timeout > 0
    }
}

/// API routing configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    /// Path prefix for `{base_path}/{entity}/{id}` requests
    pub base_path: String,
}

/// Health check configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HealthConfig {
    pub enabled: bool,
    pub path: String,
}

/// One entity served by the API
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct EntityConfig {
    pub name: String,
    /// Seed file (.json or .toml) loaded into an in-memory model
    #[serde(default)]
    pub records_file: Option<String>,
    /// Record field used as identifier
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Fields stripped from every response
    #[serde(default)]
    pub hidden_fields: Vec<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_id_field() -> String {
    "id".to_string()
}
