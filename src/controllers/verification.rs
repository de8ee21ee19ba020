use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::core::client::ContentFetcher;
use crate::core::error::{Error, UpstreamError};
use crate::token::store::TokenStore;
use crate::types::{Token, Username};

/// Issues per-user tokens and checks for them on the user's profile page.
#[derive(Clone)]
pub(crate) struct VerificationController {
    store: Arc<dyn TokenStore>,
    fetcher: Arc<dyn ContentFetcher>,
    lifespan: Duration,
    fetch_timeout: Duration,
}

impl std::fmt::Debug for VerificationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationController")
            .field("lifespan", &self.lifespan)
            .field("fetch_timeout", &self.fetch_timeout)
            .finish()
    }
}

impl VerificationController {
    pub(crate) fn new(
        store: Arc<dyn TokenStore>,
        fetcher: Arc<dyn ContentFetcher>,
        lifespan: Duration,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            store,
            fetcher,
            lifespan,
            fetch_timeout,
        }
    }

    /// Returns the live token for `username`, creating one if none exists.
    ///
    /// Repeated calls within the lifespan return the same token.
    #[instrument(skip_all, fields(username = %username))]
    pub(crate) async fn issue(&self, username: &Username) -> Result<Token, Error> {
        loop {
            if let Some(token) = self.store.get(username).await? {
                tracing::debug!("Returning live token");
                return Ok(token);
            }

            let token = Token::generate();

            if self
                .store
                .set_with_expiry(username, &token, self.lifespan)
                .await?
            {
                tracing::info!("Issued new token");
                return Ok(token);
            }

            // a concurrent issue stored its token first, return that one
            tracing::debug!("Lost issue race, rereading token");
        }
    }

    /// Whether the live token for `username` appears on their profile page.
    ///
    /// A missing token on the page is `Ok(false)`, not an error.
    #[instrument(skip_all, fields(username = %username))]
    pub(crate) async fn validate(&self, username: &Username) -> Result<bool, Error> {
        let token = self
            .store
            .get(username)
            .await?
            .ok_or(Error::PreconditionFailed)?;

        let page = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(username))
            .await
            .map_err(|_| UpstreamError::Timeout(self.fetch_timeout))??;

        let validated = page.contains(token.as_str());

        tracing::info!(validated, "Checked profile");

        Ok(validated)
    }
}
