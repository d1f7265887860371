// Configuration module entry point
// Loads application configuration and builds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::{build_registry, AppState, StartupError};
pub use types::{
    ApiConfig, Config, EntityConfig, HealthConfig, LogFormat, LoggingConfig, PerformanceConfig,
    ServerConfig,
};

/// Default config file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from `config.toml` in the working directory
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("RECORD_API")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("api.base_path", "/api")?
            .set_default("health.enabled", true)?
            .set_default("health.path", "/healthz")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{name}_{}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("record_api_config_that_does_not_exist").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert_eq!(cfg.api.base_path, "/api");
        assert!(cfg.health.enabled);
        assert_eq!(cfg.health.path, "/healthz");
        assert!(cfg.entities.is_empty());
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8080".parse().unwrap()
        );
    }

    #[test]
    fn test_load_entities_from_file() {
        let path = write_config(
            "record_api_cfg_entities",
            r#"
[server]
port = 9100

[logging]
format = "json"

[[entities]]
name = "product"
records_file = "data/products.json"
hidden_fields = ["cost"]

[[entities]]
name = "customer"
id_field = "code"
"#,
        );
        let stem = path.with_extension("");
        let cfg = Config::load_from(stem.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.entities.len(), 2);
        assert_eq!(cfg.entities[0].hidden_fields, vec!["cost".to_string()]);
        assert_eq!(cfg.entities[0].id_field, "id");
        assert_eq!(cfg.entities[1].id_field, "code");
        assert_eq!(cfg.entities[1].records_file, None);
    }

    #[test]
    fn test_invalid_socket_addr() {
        let mut cfg = Config::load_from("record_api_config_that_does_not_exist").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_keep_alive_switch() {
        let mut cfg = Config::load_from("record_api_config_that_does_not_exist").unwrap();
        assert_eq!(cfg.performance.keep_alive_timeout, 75);
        assert!(cfg.performance.keep_alive_enabled());

        cfg.performance.keep_alive_timeout = 0;
        assert!(!cfg.performance.keep_alive_enabled());
    }
}
