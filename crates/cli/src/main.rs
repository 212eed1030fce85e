use anyhow::Context;
use biblioteca_http::ApiClient;
use biblioteca_kernel::settings::Settings;
use clap::Parser;

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load biblioteca settings")?;
    if let Some(base_url) = &cli.base_url {
        settings.backend.base_url = base_url.clone();
    }

    biblioteca_telemetry::init(&settings.telemetry)?;

    tracing::debug!(
        env = ?settings.environment,
        base_url = %settings.backend.base_url,
        "console starting"
    );

    let client = ApiClient::new(&settings.backend)
        .with_context(|| format!("invalid backend settings for {}", settings.backend.base_url))?;

    commands::run(cli.command, client).await
}
