//! Tracing subscriber bootstrap for hosts embedding the engine.

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "IMPACT_LOG";

/// Install a global fmt subscriber.
///
/// `IMPACT_LOG` takes precedence over `default_filter` (normally
/// `general.log_filter` from the config).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

