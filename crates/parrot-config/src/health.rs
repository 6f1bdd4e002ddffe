use serde::Deserialize;

/// Path the health endpoint is mounted on unless configured otherwise
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// Liveness endpoint settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    /// Answer `200 ok` on `path`
    pub enabled: bool,
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_HEALTH_PATH.to_owned(),
        }
    }
}
