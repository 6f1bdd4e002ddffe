//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use parrot_config::{CompletionsConfig, Config, HealthConfig, IdStrategy, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults and no chunk pacing
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                completions: CompletionsConfig {
                    chunk_delay: "0ms".to_owned(),
                    ..CompletionsConfig::default()
                },
                telemetry: None,
            },
        }
    }

    /// Pause between streamed chunks
    pub fn with_chunk_delay(mut self, delay: &str) -> Self {
        self.config.completions.chunk_delay = delay.to_owned();
        self
    }

    /// Model reported when a request omits one
    pub fn with_default_model(mut self, model: &str) -> Self {
        self.config.completions.default_model = model.to_owned();
        self
    }

    /// Completion id scheme
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.config.completions.id_strategy = strategy;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
