use crate::app_env;
use crate::config::OtelEndpoints;
use anyhow::Context;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{KeyValue, global};
use opentelemetry_http::HeaderExtractor;
use opentelemetry_otlp::{MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::TracerProvider;
use opentelemetry_sdk::{Resource, runtime};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing::{Span, debug, debug_span, field, warn};
use tracing_opentelemetry::{MetricsLayer, OpenTelemetryLayer, OpenTelemetrySpanExt};
use tracing_subscriber::{EnvFilter, prelude::*, registry};

/// The name of the service as it should appear in OpenTelemetry collectors
const SERVICE_NAME: &str = "todo-rest";

/// OpenTelemetry providers which export spans and metrics in the background
pub struct OtelExporters {
    tracer_provider: TracerProvider,
    meter_provider: SdkMeterProvider,
}

impl OtelExporters {
    /// Flushes anything still buffered and stops the background exporters
    pub fn shutdown(self) {
        if let Err(err) = self.tracer_provider.shutdown() {
            warn!("Failed to flush span exporter: {err}");
        }
        if let Err(err) = self.meter_provider.shutdown() {
            warn!("Failed to flush metric exporter: {err}");
        }
    }
}

/// Wraps every request in a "request" span which records the method, path, status and latency.
/// W3C trace context on the incoming request becomes the span's parent.
pub fn attach_tracing_http<T>(router: Router<T>) -> Router<T>
where
    T: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let req_span = debug_span!(
                        "request",
                        method = request.method().as_str(),
                        path = request.uri().path(),
                        response_status = field::Empty,
                        latency_ms = field::Empty,
                    );

                    req_span.set_parent(global::get_text_map_propagator(|propagator| {
                        propagator.extract(&HeaderExtractor(request.headers()))
                    }));

                    req_span
                })
                .on_response(|response: &Response<Body>, latency: Duration, span: &Span| {
                    span.record("response_status", field::display(response.status()));
                    span.record("latency_ms", latency.as_millis() as u64);
                    debug!("request processing complete");
                }),
        ),
    )
}

/// Builds OTLP (gRPC) exporters for spans and metrics. They need a running tokio runtime.
pub fn init_exporters(endpoints: &OtelEndpoints) -> Result<OtelExporters, anyhow::Error> {
    let span_export = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoints.spans.as_str())
        .build()
        .context("building the span exporter")?;
    let meter_export = MetricExporter::builder()
        .with_tonic()
        .with_endpoint(endpoints.metrics.as_str())
        .build()
        .context("building the metric exporter")?;

    let service_resource = Resource::new([KeyValue::new("service.name", SERVICE_NAME)]);
    let tracer_provider = TracerProvider::builder()
        .with_batch_exporter(span_export, runtime::Tokio)
        .with_resource(service_resource.clone())
        .build();
    let meter_provider = SdkMeterProvider::builder()
        .with_reader(PeriodicReader::builder(meter_export, runtime::Tokio).build())
        .with_resource(service_resource)
        .build();

    Ok(OtelExporters {
        tracer_provider,
        meter_provider,
    })
}

/// Per-module filter for stdout logs, read from [app_env::LOG_LEVEL]. Filters to "info" when unset,
/// and skips directives it can't parse.
pub fn init_env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(app_env::LOG_LEVEL)
        .from_env_lossy()
}

/// Installs the global subscriber. Stdout gets JSON logs filtered by `env_filter`; when
/// exporters are provided, everything at "debug" and above is also shipped to OpenTelemetry.
pub fn setup_logging_and_tracing(env_filter: EnvFilter, otel_exporters: Option<&OtelExporters>) {
    global::set_text_map_propagator(TraceContextPropagator::new());

    registry()
        .with(LevelFilter::DEBUG)
        .with(otel_exporters.map(|exporters| {
            OpenTelemetryLayer::new(exporters.tracer_provider.tracer(SERVICE_NAME))
        }))
        .with(otel_exporters.map(|exporters| MetricsLayer::new(exporters.meter_provider.clone())))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_filter(env_filter),
        )
        .init();
}
