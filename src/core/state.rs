use std::sync::Arc;

use crate::controllers::verification::VerificationController;
use crate::core::client::ProfileFetcher;
use crate::core::config::Args;
use crate::core::error::ConfigError;
use crate::token::postgres::PgStore;
use crate::token::store::{MemoryStore, TokenStore};

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) verification: VerificationController,
}

impl AppState {
    pub(crate) async fn new(config: &Args) -> Result<Self, ConfigError> {
        let store: Arc<dyn TokenStore> = match &config.store_connection_url {
            Some(url) => {
                tracing::info!("Using Postgres token store");
                Arc::new(PgStore::connect(url).await?)
            }
            None => {
                tracing::warn!("No store connection URL set, tokens are kept in memory");
                Arc::new(MemoryStore::new())
            }
        };

        let fetcher = ProfileFetcher::new(
            &config.user,
            &config.profile_url,
            &config.upstream_fetch_credentials,
        )?;

        Ok(Self::from_controller(VerificationController::new(
            store,
            Arc::new(fetcher),
            config.lifespan(),
            config.fetch_timeout(),
        )))
    }

    pub(crate) fn from_controller(verification: VerificationController) -> Self {
        Self { verification }
    }
}
