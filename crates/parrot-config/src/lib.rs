#![allow(clippy::must_use_candidate)]

pub mod completions;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use completions::*;
pub use health::*;
pub use server::*;
pub use telemetry::{ExportProtocol, TelemetryConfig};

/// Top-level Parrot configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Chat completion emulation settings
    #[serde(default)]
    pub completions: CompletionsConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
