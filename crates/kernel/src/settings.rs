use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "BIBLIOTECA_ENV";
const CONFIG_DIR_ENV: &str = "BIBLIOTECA_CONFIG_DIR";
const ENV_PREFIX: &str = "BIBLIOTECA";

/// Deployment environment the console is pointed at.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Resolve the environment name and config directory from the process
    /// environment, then layer sources via [`Settings::from_dir`]. A missing
    /// `.env` is fine.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let name = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let environment = Environment::parse(&name)?;
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .context("cannot resolve the working directory")?
                .join("config"),
        };

        Self::from_dir(&config_dir, environment)
    }

    /// `base.toml`, then `{environment}.toml`, then `BIBLIOTECA_*`
    /// variables. Both files are optional.
    pub fn from_dir(config_dir: &Path, environment: Environment) -> anyhow::Result<Self> {
        let overlay = config_dir.join(format!("{}.toml", environment.as_str()));

        // `BIBLIOTECA_BACKEND__BASE_URL` lands on `backend.base_url`.
        let variables = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__");

        let layered = config::Config::builder()
            .add_source(config::File::from(config_dir.join("base.toml")).required(false))
            .add_source(config::File::from(overlay).required(false))
            .add_source(variables)
            .build()
            .with_context(|| format!("cannot read configuration from {}", config_dir.display()))?;

        let mut settings: Settings = layered
            .try_deserialize()
            .context("configuration does not match the expected sections")?;
        settings.environment = environment;
        Ok(settings)
    }
}

/// Where the catalog REST backend lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "BackendSettings::default_base_url")]
    pub base_url: String,
    #[serde(default = "BackendSettings::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl BackendSettings {
    fn default_base_url() -> String {
        "http://localhost:8080/api".to_string()
    }

    fn default_timeout_ms() -> u64 {
        10_000
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "TelemetrySettings::default_filter")]
    pub filter: String,
}

impl TelemetrySettings {
    fn default_filter() -> String {
        "warn".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            filter: Self::default_filter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
