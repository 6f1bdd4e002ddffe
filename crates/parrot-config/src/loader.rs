use std::path::Path;
use std::time::Duration;

use crate::Config;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "parrot.toml";

/// Longest accepted pause between streamed chunks
const MAX_CHUNK_DELAY: Duration = Duration::from_secs(10);

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Load `parrot.toml` from the working directory, or fall back to defaults
    /// when it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded
    pub fn load_default() -> anyhow::Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);

        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Parse configuration from raw TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if any section holds an unusable value
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server_config()?;
        self.validate_completions_config()?;
        self.validate_telemetry_config()?;
        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': `{}`", health.path);
        }

        Ok(())
    }

    fn validate_completions_config(&self) -> anyhow::Result<()> {
        if self.completions.default_model.trim().is_empty() {
            anyhow::bail!("completions.default_model must not be empty");
        }

        let delay = self.completions.chunk_delay()?;
        if delay > MAX_CHUNK_DELAY {
            anyhow::bail!(
                "completions.chunk_delay of {delay:?} exceeds maximum of {MAX_CHUNK_DELAY:?}"
            );
        }

        Ok(())
    }

    fn validate_telemetry_config(&self) -> anyhow::Result<()> {
        let Some(telemetry) = &self.telemetry else {
            return Ok(());
        };

        let ratio = telemetry.sampling_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            anyhow::bail!("telemetry.sampling_ratio must be between 0.0 and 1.0, got {ratio}");
        }

        if telemetry.export_interval()?.is_zero() {
            anyhow::bail!("telemetry.export_interval must be greater than zero");
        }

        Ok(())
    }
}
