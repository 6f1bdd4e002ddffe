use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource::SERVICE_VERSION;
use parrot_config::TelemetryConfig;

/// Resource describing this process to the collector
///
/// Configured attributes are added after the built-in ones and may
/// override the version.
pub fn build_resource(config: &TelemetryConfig) -> Resource {
    let custom = config
        .resource_attributes
        .iter()
        .map(|(key, value)| KeyValue::new(key.clone(), value.clone()));

    Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attribute(KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")))
        .with_attributes(custom)
        .build()
}
