use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::core::client::ContentFetcher;
use crate::core::error::{Error, UpstreamError};
use crate::types::Username;

/// Serves a fixed profile page and records which usernames were requested.
#[derive(Clone, Debug, Default)]
pub(crate) struct StubFetcher {
    page: Arc<Mutex<String>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl StubFetcher {
    pub(crate) fn new(page: &str) -> Self {
        let fetcher = Self::default();
        fetcher.set_page(page);
        fetcher
    }

    pub(crate) fn set_page(&self, page: &str) {
        *self.page.lock().unwrap() = page.to_owned();
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentFetcher for StubFetcher {
    async fn fetch(&self, username: &Username) -> Result<String, Error> {
        self.requested.lock().unwrap().push(username.to_string());
        Ok(self.page.lock().unwrap().clone())
    }
}

/// Never answers within any reasonable timeout.
#[derive(Clone, Debug)]
pub(crate) struct HangingFetcher;

#[async_trait]
impl ContentFetcher for HangingFetcher {
    async fn fetch(&self, _username: &Username) -> Result<String, Error> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(String::new())
    }
}

#[derive(Clone, Debug)]
pub(crate) struct FailingFetcher;

#[async_trait]
impl ContentFetcher for FailingFetcher {
    async fn fetch(&self, _username: &Username) -> Result<String, Error> {
        Err(Error::UpstreamUnavailable(UpstreamError::Timeout(
            Duration::ZERO,
        )))
    }
}
