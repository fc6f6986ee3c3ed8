//! Tracing subscriber setup.
//!
//! Always installs an `EnvFilter` and a text or JSON formatter. With the
//! `observability` feature, spans are also exported through OpenTelemetry
//! to stdout.

use factreel_error::{ConfigError, ConfigErrorKind, FactreelResult};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// How logs are filtered and formatted.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Service name for telemetry attribution
    pub service_name: String,
    /// Filter used when `RUST_LOG` is unset (e.g., "info", "factreel=debug")
    pub log_level: String,
    /// Emit one JSON object per event
    pub json_logs: bool,
}

impl TracingConfig {
    /// Configuration for `service_name` at `info`.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Set the fallback filter.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns a configuration error if the filter is invalid or a subscriber
/// is already installed.
pub fn init_tracing(config: &TracingConfig) -> FactreelResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| {
            ConfigError::new(ConfigErrorKind::LogFilter {
                filter: config.log_level.clone(),
                reason: e.to_string(),
            })
        })?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    let registry = tracing_subscriber::registry().with(env_filter).with(fmt_layer);

    #[cfg(feature = "observability")]
    let registry = registry.with(otel::layer(&config.service_name));

    registry
        .try_init()
        .map_err(|e| ConfigError::new(ConfigErrorKind::Subscriber(e.to_string())))?;
    Ok(())
}

#[cfg(feature = "observability")]
mod otel {
    use opentelemetry::{KeyValue, global, trace::TracerProvider};
    use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
    use opentelemetry_stdout::SpanExporter;
    use tracing::Subscriber;
    use tracing_subscriber::registry::LookupSpan;

    /// Stdout span exporter registered as the global tracer provider.
    pub(super) fn layer<S>(service_name: &str) -> impl tracing_subscriber::Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        let resource = Resource::builder()
            .with_service_name(service_name.to_string())
            .with_attributes(vec![KeyValue::new(
                "service.version",
                env!("CARGO_PKG_VERSION"),
            )])
            .build();

        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(SpanExporter::default())
            .with_resource(resource)
            .build();
        global::set_tracer_provider(provider.clone());

        let tracer = provider.tracer(service_name.to_string());
        tracing_opentelemetry::layer().with_tracer(tracer)
    }
}
