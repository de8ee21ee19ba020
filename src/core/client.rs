use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use tracing::instrument;

use crate::core::error::{ConfigError, Error};
use crate::types::Username;

/// Retrieves the raw text of a user's external profile page.
#[async_trait]
pub(crate) trait ContentFetcher: Send + Sync {
    async fn fetch(&self, username: &Username) -> Result<String, Error>;
}

#[derive(Clone)]
pub(crate) struct ProfileFetcher {
    client: reqwest::Client,
    url: String,
}

// cookies stay out of the logs
impl std::fmt::Debug for ProfileFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileFetcher")
            .field("url", &self.url)
            .finish()
    }
}

impl ProfileFetcher {
    /// `credentials` is forwarded verbatim as the `Cookie` header when non-empty.
    pub(crate) fn new(user: &str, url: &str, credentials: &str) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();

        if !credentials.is_empty() {
            let mut cookie =
                HeaderValue::from_str(credentials).map_err(|_| ConfigError::InvalidCredentials)?;
            cookie.set_sensitive(true);
            headers.insert(COOKIE, cookie);
        }

        let client = reqwest::ClientBuilder::new()
            .user_agent(user)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    fn profile_url(&self, username: &Username) -> String {
        format!("{}{}", self.url, username)
    }
}

#[async_trait]
impl ContentFetcher for ProfileFetcher {
    #[instrument(skip_all)]
    async fn fetch(&self, username: &Username) -> Result<String, Error> {
        tracing::debug!("Fetching profile for {}", username);

        Ok(self
            .client
            .get(self.profile_url(username))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?)
    }
}
