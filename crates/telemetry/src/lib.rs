//! Logging bootstrap for the console.

use anyhow::anyhow;
use biblioteca_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean. `RUST_LOG` wins over the configured filter.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = build_filter(settings)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {}", err))?;

    tracing::debug!(
        target: "biblioteca-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}

fn build_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.filter)
            .map_err(|err| anyhow!("invalid log filter '{}': {}", settings.filter, err)),
    }
}
