//! Logging and OpenTelemetry export for Parrot
//!
//! Local logging always goes through a `tracing-subscriber` fmt layer. When
//! the telemetry section names an OTLP endpoint, spans are bridged through
//! `tracing-opentelemetry` and a global meter provider is installed so
//! [`CompletionMetrics`] reaches the collector.

mod metadata;
pub mod metrics;

use opentelemetry::global;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};
use parrot_config::{ExportProtocol, TelemetryConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use url::Url;

pub use metrics::CompletionMetrics;

/// Output format of local log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Keeps exporters alive; flushes and shuts them down when dropped
///
/// Hold it for as long as the process serves requests.
#[must_use = "dropping the guard shuts telemetry export down"]
pub struct TelemetryGuard {
    meter_provider: Option<SdkMeterProvider>,
    tracer_provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Push pending metrics now instead of waiting for the export interval
    ///
    /// # Errors
    ///
    /// Returns an error if the meter provider fails to flush
    pub fn force_flush(&self) -> anyhow::Result<()> {
        if let Some(provider) = &self.meter_provider {
            provider
                .force_flush()
                .map_err(|e| anyhow::anyhow!("failed to flush metrics: {e}"))?;
        }
        Ok(())
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        // the subscriber may already be gone here
        if let Some(provider) = self.meter_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shut down meter provider: {e}");
        }
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shut down tracer provider: {e}");
        }
    }
}

/// Install the global subscriber and, when configured, OTLP exporters
///
/// `RUST_LOG` wins over `log_filter`; an unparsable filter falls back to
/// `info`.
///
/// # Errors
///
/// Returns an error if an exporter cannot be built or a global subscriber is
/// already installed
pub fn init(config: Option<&TelemetryConfig>, log_filter: &str, format: LogFormat) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer().with_target(true).boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().flatten_event(true).boxed(),
    };

    let mut guard = TelemetryGuard {
        meter_provider: None,
        tracer_provider: None,
    };

    let resource = config.map(metadata::build_resource);

    if let (Some(config), Some(resource)) = (config, &resource)
        && let Some(endpoint) = config.metrics_endpoint()
    {
        let provider = meter_provider(config, endpoint, resource.clone())?;
        global::set_meter_provider(provider.clone());
        guard.meter_provider = Some(provider);
    }

    let mut otel_layer = None;
    if let (Some(config), Some(resource)) = (config, resource)
        && let Some(endpoint) = config.trace_endpoint()
    {
        let provider = tracer_provider(config, endpoint, resource)?;
        otel_layer = Some(tracing_opentelemetry::layer().with_tracer(provider.tracer("parrot")));
        global::set_tracer_provider(provider.clone());
        guard.tracer_provider = Some(provider);
    }

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(otel_layer)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    if let Some(config) = config {
        tracing::debug!(
            service_name = %config.service_name,
            traces = guard.tracer_provider.is_some(),
            metrics = guard.meter_provider.is_some(),
            "telemetry initialized"
        );
    }

    Ok(guard)
}

fn meter_provider(config: &TelemetryConfig, endpoint: &Url, resource: Resource) -> anyhow::Result<SdkMeterProvider> {
    let exporter = match config.protocol {
        ExportProtocol::Grpc => MetricExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint.as_str())
            .build(),
        ExportProtocol::HttpProto => MetricExporter::builder()
            .with_http()
            .with_endpoint(endpoint.as_str())
            .build(),
    }
    .map_err(|e| anyhow::anyhow!("failed to build metrics exporter for {endpoint}: {e}"))?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(config.export_interval()?)
        .build();

    Ok(SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(reader)
        .build())
}

fn tracer_provider(config: &TelemetryConfig, endpoint: &Url, resource: Resource) -> anyhow::Result<SdkTracerProvider> {
    let exporter = match config.protocol {
        ExportProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint.as_str())
            .build(),
        ExportProtocol::HttpProto => SpanExporter::builder()
            .with_http()
            .with_endpoint(endpoint.as_str())
            .build(),
    }
    .map_err(|e| anyhow::anyhow!("failed to build span exporter for {endpoint}: {e}"))?;

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_sampler(sampler(config))
        .with_batch_exporter(exporter)
        .build())
}

fn sampler(config: &TelemetryConfig) -> Sampler {
    let root = match config.sampling_ratio {
        ratio if ratio >= 1.0 => Sampler::AlwaysOn,
        ratio if ratio <= 0.0 => Sampler::AlwaysOff,
        ratio => Sampler::TraceIdRatioBased(ratio),
    };

    if config.parent_based {
        Sampler::ParentBased(Box::new(root))
    } else {
        root
    }
}
