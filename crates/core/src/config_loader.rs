use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

/// Default location of the TOML config file.
pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by layering defaults, `config/Config.toml`, and `APP_` env vars.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration from a specific TOML file.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    /// Nested keys come from the environment as `APP_FEED__TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be parsed.
    pub fn load_from(path: &str) -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("APP_").split("__"))
            .extract()?;

        tracing::debug!(path, "Loaded configuration");
        Ok(config)
    }
}
