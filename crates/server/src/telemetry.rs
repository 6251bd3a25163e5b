use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};

use crate::auth::jwt::Claims;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const TRACER_NAME: &str = "auraliva";

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Tonic's `connect_lazy()` spawns onto the current Tokio runtime, which
/// `dioxus::serve` may not have entered yet when startup runs.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Set up OTLP trace and log export when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
///
/// Dioxus owns the tracing subscriber; this only registers the global
/// tracer provider used by [`OtelTraceLayer`] and bridges the `log` crate.
///
/// Environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address, e.g. `http://localhost:4317`
///   - `OTEL_SERVICE_NAME`: service name (default `auraliva`)
///   - `OTEL_INGESTION_KEY`: sent as `x-ingestion-key` metadata when present
///   - `DEPLOY_ENV`: deployment environment tag (default `development`)
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP export");
        return;
    };

    match try_init(&endpoint) {
        Ok(()) => tracing::info!(%endpoint, version = APP_VERSION, "Telemetry initialized"),
        Err(e) => tracing::warn!(%endpoint, error = %e, "Telemetry disabled"),
    }
}

fn try_init(endpoint: &str) -> InitResult {
    let rt = match OTEL_RUNTIME.get() {
        Some(rt) => rt,
        None => {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .worker_threads(1)
                .build()?;
            OTEL_RUNTIME.get_or_init(|| rt)
        }
    };
    let _guard = rt.enter();

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| TRACER_NAME.to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());
    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let metadata = ingestion_metadata()?;
    let tls = endpoint.starts_with("https://");

    let mut spans = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint);
    let mut logs = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint);
    if tls {
        spans = spans.with_tls_config(
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
        logs = logs.with_tls_config(
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
    }
    if let Some(md) = metadata {
        spans = spans.with_metadata(md.clone());
        logs = logs.with_metadata(md);
    }

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(spans.build()?)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(provider);

    let logger_provider = opentelemetry_sdk::logs::SdkLoggerProvider::builder()
        .with_batch_exporter(logs.build()?)
        .with_resource(resource)
        .build();
    if LOGGER_PROVIDER.set(logger_provider).is_err() {
        tracing::debug!("OTLP log provider already installed");
        return Ok(());
    }
    if let Some(provider) = LOGGER_PROVIDER.get() {
        let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(provider);
        match log::set_boxed_logger(Box::new(bridge)) {
            Ok(()) => log::set_max_level(log::LevelFilter::Info),
            Err(_) => tracing::debug!("log bridge skipped, a logger is already installed"),
        }
    }
    Ok(())
}

fn ingestion_metadata(
) -> Result<Option<opentelemetry_otlp::tonic_types::metadata::MetadataMap>, Box<dyn std::error::Error + Send + Sync>>
{
    match std::env::var("OTEL_INGESTION_KEY") {
        Ok(key) if !key.is_empty() => {
            let mut md = opentelemetry_otlp::tonic_types::metadata::MetadataMap::new();
            md.insert("x-ingestion-key", key.parse()?);
            Ok(Some(md))
        }
        _ => Ok(None),
    }
}

/// Collapse record ids in a request path so spans group by route,
/// e.g. `/api/expenses/exp-4/approve` becomes `/api/expenses/{id}/approve`.
fn route_template(path: &str) -> String {
    path.split('/')
        .map(|segment| if looks_like_id(segment) { "{id}" } else { segment })
        .collect::<Vec<_>>()
        .join("/")
}

fn looks_like_id(segment: &str) -> bool {
    if segment.is_empty() {
        return false;
    }
    if segment.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    match segment.split_once('-') {
        Some((prefix, rest)) => {
            !prefix.is_empty()
                && prefix.chars().all(|c| c.is_ascii_lowercase())
                && !rest.is_empty()
                && rest.chars().all(|c| c.is_ascii_alphanumeric())
                && rest.chars().any(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Tower layer that creates an OpenTelemetry span for each HTTP request.
///
/// Captures method, route, request ID, response status and the session's
/// user id and role when signed in.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer(TRACER_NAME);
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let route = route_template(&path);

        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let mut attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path),
            KeyValue::new("http.route", route.clone()),
            KeyValue::new("http.request_id", request_id),
        ];
        match req.extensions().get::<Claims>() {
            Some(claims) => attributes.extend([
                KeyValue::new("user.id", claims.sub.clone()),
                KeyValue::new("user.role", claims.role.as_str()),
                KeyValue::new("auth.status", "authenticated"),
            ]),
            None => attributes.push(KeyValue::new("auth.status", "anonymous")),
        }

        let span = tracer
            .span_builder(format!("{method} {route}"))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));

            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_collapse_to_placeholder() {
        assert_eq!(
            route_template("/api/expenses/exp-4/approve"),
            "/api/expenses/{id}/approve"
        );
        assert_eq!(
            route_template("/api/residents/res-3f9a1c2b"),
            "/api/residents/{id}"
        );
        assert_eq!(route_template("/api/invoices/42/verify"), "/api/invoices/{id}/verify");
    }

    #[test]
    fn named_segments_are_kept() {
        assert_eq!(route_template("/api/visitors/qr-exit"), "/api/visitors/qr-exit");
        assert_eq!(
            route_template("/api/notifications/read-all"),
            "/api/notifications/read-all"
        );
        assert_eq!(route_template("/health"), "/health");
    }
}
