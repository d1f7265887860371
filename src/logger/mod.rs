//! Logger module
//!
//! Provides logging utilities for the record server including:
//! - tracing subscriber initialization (text or JSON)
//! - Access logging with multiple formats
//! - Server lifecycle logging

mod format;

pub use format::AccessLogEntry;

use crate::config::{Config, LogFormat, LoggingConfig};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Target used for access log lines, filterable with `RUST_LOG=access=off`
pub const ACCESS_TARGET: &str = "access";

/// Initialize the tracing subscriber with configuration
///
/// `RUST_LOG` takes precedence over `logging.level`. Safe to call multiple
/// times; later calls keep the first subscriber and log at debug.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if let Err(err) = result {
        // Goes to the subscriber that is already installed
        tracing::debug!(error = %err, "tracing subscriber already initialized");
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!(
        %addr,
        base_path = %config.api.base_path,
        entities = config.entities.len(),
        workers = ?config.server.workers,
        max_connections = ?config.performance.max_connections,
        "record server listening"
    );
    if config.health.enabled {
        tracing::info!(path = %config.health.path, "health endpoint enabled");
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}

pub fn log_api_request(method: &str, path: &str, status: u16) {
    tracing::debug!(%method, %path, status, "api request");
}
