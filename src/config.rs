use crate::app_env;
use std::env;
use thiserror::Error;

/// Port used when [app_env::PORT] isn't set
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{variable} must be a valid port number, got \"{value}\"")]
    InvalidPort { variable: &'static str, value: String },
}

/// Where OpenTelemetry data gets shipped
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct OtelEndpoints {
    pub spans: String,
    pub metrics: String,
}

/// Settings read once at process startup
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Selects the PostgreSQL backend when present, the in-memory one otherwise
    pub database_url: Option<String>,
    /// Only set when both the span and metric endpoints are configured
    pub otel: Option<OtelEndpoints>,
}

impl AppConfig {
    /// Reads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|variable| env::var(variable).ok())
    }

    /// Reads configuration through `lookup`, treating blank values as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |variable: &str| lookup(variable).filter(|value| !value.trim().is_empty());

        let port = match read(app_env::PORT) {
            None => DEFAULT_PORT,
            Some(raw_port) => raw_port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort {
                    variable: app_env::PORT,
                    value: raw_port,
                })?,
        };

        let otel = match (
            read(app_env::OTEL_SPAN_EXPORT_URL),
            read(app_env::OTEL_METRIC_EXPORT_URL),
        ) {
            (Some(spans), Some(metrics)) => Some(OtelEndpoints { spans, metrics }),
            _ => None,
        };

        Ok(AppConfig {
            port,
            database_url: read(app_env::DB_URL),
            otel,
        })
    }
}
