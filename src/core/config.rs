use config::Config;
use serde::Deserialize;
use std::time::Duration;

use crate::core::error::ConfigError;

/// One year.
pub(crate) const MAX_LIFESPAN_MINUTES: u64 = 365 * 24 * 60;
pub(crate) const MAX_LIFESPAN: Duration = Duration::from_secs(MAX_LIFESPAN_MINUTES * 60);

pub(crate) const DEFAULT_PROFILE_URL: &str =
    "http://forums.somethingawful.com/member.php?action=getinfo&username=";

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    pub(crate) user: String,
    pub(crate) log_level: String,
    pub(crate) port: u16,
    pub(crate) lifespan_minutes: u64,
    pub(crate) upstream_fetch_credentials: String,
    pub(crate) store_connection_url: Option<String>,
    pub(crate) profile_url: String,
    pub(crate) fetch_timeout_secs: u64,
}

impl Args {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("user", "verifycore")?
            .set_default("log_level", "info")?
            .set_default("port", 8000)?
            .set_default("lifespan_minutes", 5)?
            .set_default("upstream_fetch_credentials", "")?
            .set_default("profile_url", DEFAULT_PROFILE_URL)?
            .set_default("fetch_timeout_secs", 10)?
            .add_source(config::Environment::with_prefix("VERIFYCORE"))
            .build()?
            .try_deserialize::<Args>()?
            .validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.lifespan_minutes == 0 || self.lifespan_minutes > MAX_LIFESPAN_MINUTES {
            return Err(ConfigError::InvalidLifespan);
        }

        Ok(self)
    }

    pub(crate) fn lifespan(&self) -> Duration {
        Duration::from_secs(self.lifespan_minutes * 60)
    }

    pub(crate) fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
