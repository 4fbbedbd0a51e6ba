use anyhow::Result;
use config::{Config, ConfigBuilder, Environment, Source, builder::DefaultState};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Limits applied to occurrence previews served over HTTP.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    /// Upper bound on occurrences returned per request. Values above the
    /// engine's own cap are clamped by the engine.
    pub max_count: usize,
}

impl Settings {
    /// ## Summary
    /// Returns a builder preloaded with the default values for every setting.
    ///
    /// ## Errors
    /// Returns an error if a default value cannot be registered.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("logging.level", "debug")?
            .set_default("preview.max_count", 100)?)
    }

    /// ## Summary
    /// Loads configuration from the optional `config.toml` and environment variables into a `Settings`.
    /// Environment variables take precedence over `config.toml` values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::layered(
            config::File::with_name("config.toml").required(false),
            environment(),
        )
    }

    /// ## Summary
    /// Layers `file` over the defaults and `env` over `file`, then validates.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the configuration fails.
    pub fn layered<F>(file: F, env: Environment) -> Result<Self>
    where
        F: Source + Send + Sync + 'static,
    {
        let settings = Self::defaults()?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks the loaded values for combinations the server cannot run with.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the preview limit is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.preview.max_count == 0 {
            return Err(CoreError::ConfigError(
                "preview.max_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Environment source for settings. Sections are separated by a double
/// underscore, so `PREVIEW__MAX_COUNT` sets `preview.max_count`.
fn environment() -> Environment {
    Environment::default()
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
