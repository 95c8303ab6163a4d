/// Port the HTTP server listens on. Defaults to 8080.
pub const PORT: &str = "PORT";
/// URL for accessing the PostgreSQL database (should contain a schema name in the path). When
/// unset, to-do items are kept in memory instead.
pub const DB_URL: &str = "DATABASE_URL";
/// Log level configuration for the application. For formatting info, see [tracing_subscriber's EnvFilter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL, typically http://localhost:4317 with a collector sidecar
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL, typically http://localhost:4317 with a collector sidecar
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

pub mod test {
    /// URL for accessing the PostgreSQL database during integration tests (should not contain a schema name in the path)
    pub const TEST_DB_URL: &str = "TEST_DB_URL";
}
