//! Tracing setup for the shopctl console
//!
//! Logs go to stderr so stdout stays the menu and report surface.
//!
//! Usage:
//!   shopctl --debug shop 5432 me       # Debug logging
//!   RUST_LOG=shopctl_db=debug shopctl  # Fine-grained log control

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (ignored when RUST_LOG is set)
    pub debug: bool,
    /// Level used when neither RUST_LOG nor --debug is given
    pub level: String,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        let fallback = if self.debug { "debug" } else { self.level.as_str() };
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

pub fn init(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_writer(std::io::stderr)
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_failure() {
        let config = TracingConfig {
            debug: false,
            level: "warn".into(),
        };
        let _ = init(&config);
        assert!(init(&config).is_err());
    }
}
