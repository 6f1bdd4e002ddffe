use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// OpenTelemetry export settings
///
/// Without an `endpoint` nothing leaves the process and only local logging
/// is set up. `traces` and `metrics` switch each signal off independently.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Extra attributes attached to the exported resource
    #[serde(default)]
    pub resource_attributes: BTreeMap<String, String>,
    /// OTLP collector endpoint
    #[serde(default)]
    pub endpoint: Option<Url>,
    #[serde(default)]
    pub protocol: ExportProtocol,
    /// How often metrics are pushed (e.g. "30s")
    #[serde(default = "default_export_interval")]
    pub export_interval: String,
    /// Fraction of root traces kept, `0.0..=1.0`
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,
    /// Follow the caller's sampling decision when one is propagated
    #[serde(default = "default_true")]
    pub parent_based: bool,
    #[serde(default = "default_true")]
    pub traces: bool,
    #[serde(default = "default_true")]
    pub metrics: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            resource_attributes: BTreeMap::new(),
            endpoint: None,
            protocol: ExportProtocol::default(),
            export_interval: default_export_interval(),
            sampling_ratio: default_sampling_ratio(),
            parent_based: true,
            traces: true,
            metrics: true,
        }
    }
}

impl TelemetryConfig {
    /// Endpoint traces are exported to, if trace export is on
    pub fn trace_endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref().filter(|_| self.traces)
    }

    /// Endpoint metrics are exported to, if metric export is on
    pub fn metrics_endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref().filter(|_| self.metrics)
    }

    /// Parse the metric export interval
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid duration string
    pub fn export_interval(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.export_interval)
            .map_err(|e| anyhow::anyhow!("invalid telemetry.export_interval '{}': {e}", self.export_interval))
    }
}

/// OTLP transport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportProtocol {
    #[default]
    Grpc,
    HttpProto,
}

fn default_service_name() -> String {
    "parrot".to_owned()
}

fn default_export_interval() -> String {
    "30s".to_owned()
}

#[allow(clippy::missing_const_for_fn)]
fn default_sampling_ratio() -> f64 {
    1.0
}

#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}
