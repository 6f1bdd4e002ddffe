use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use parrot_telemetry::LogFormat;

/// Parrot mock chat completion server
#[derive(Debug, Parser)]
#[command(name = "parrot", about = "Mock OpenAI chat completion server that echoes your last message")]
pub struct Args {
    /// Path to configuration file; `parrot.toml` is used when present
    #[arg(short, long, env = "PARROT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "PARROT_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, default_value = "info", env = "PARROT_LOG_LEVEL")]
    pub log_level: String,

    /// Emit log lines as JSON objects
    #[arg(long, env = "PARROT_LOG_JSON")]
    pub log_json: bool,
}

impl Args {
    pub const fn log_format(&self) -> LogFormat {
        if self.log_json { LogFormat::Json } else { LogFormat::Text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["parrot"]).unwrap();

        assert!(args.config.is_none());
        assert!(args.listen.is_none());
        assert_eq!(args.log_level, "info");
        assert_eq!(args.log_format(), LogFormat::Text);
    }

    #[test]
    fn listen_override() {
        let args = Args::try_parse_from(["parrot", "--listen", "127.0.0.1:8080", "-c", "mock.toml"]).unwrap();

        assert_eq!(args.listen, Some("127.0.0.1:8080".parse().unwrap()));
        assert_eq!(args.config, Some(PathBuf::from("mock.toml")));

        let args = Args::try_parse_from(["parrot", "--log-json"]).unwrap();
        assert_eq!(args.log_format(), LogFormat::Json);
    }
}
