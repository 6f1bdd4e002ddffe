use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::Deserialize;

use crate::health::HealthConfig;

/// Address used when neither the config file nor the CLI sets one
pub const DEFAULT_LISTEN_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000);

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Log method, URI, headers, query and body of every inbound request at `debug`
    #[serde(default = "default_log_requests")]
    pub log_requests: bool,
    #[serde(default)]
    pub health: HealthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            log_requests: true,
            health: HealthConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Effective listen address
    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address.unwrap_or(DEFAULT_LISTEN_ADDRESS)
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_log_requests() -> bool {
    true
}
