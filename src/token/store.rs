use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::instrument;

use crate::core::config::MAX_LIFESPAN;
use crate::core::error::Error;
use crate::types::{Token, Username};

/// Expiring username -> token mapping.
///
/// Expiry is enforced by the store: once a token's lifespan has elapsed,
/// `get` reports it as absent without any explicit deletion.
#[async_trait]
pub(crate) trait TokenStore: Send + Sync {
    async fn get(&self, username: &Username) -> Result<Option<Token>, Error>;

    /// Stores `token` for `lifespan` unless a live token already exists.
    ///
    /// Returns `false` without touching the live entry when one is present.
    /// The check and the write happen atomically.
    async fn set_with_expiry(
        &self,
        username: &Username,
        token: &Token,
        lifespan: Duration,
    ) -> Result<bool, Error>;
}

#[derive(Debug)]
struct Entry {
    token: Token,
    expiry: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expiry
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryStore(Arc<RwLock<HashMap<Username, Entry>>>);

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    #[instrument(skip_all)]
    async fn get(&self, username: &Username) -> Result<Option<Token>, Error> {
        let now = Instant::now();

        Ok(self
            .0
            .read()
            .await
            .get(username)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.token.clone()))
    }

    #[instrument(skip_all)]
    async fn set_with_expiry(
        &self,
        username: &Username,
        token: &Token,
        lifespan: Duration,
    ) -> Result<bool, Error> {
        let now = Instant::now();
        let mut entries = self.0.write().await;

        if entries.get(username).is_some_and(|entry| entry.is_live(now)) {
            return Ok(false);
        }

        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(
            username.clone(),
            Entry {
                token: token.clone(),
                expiry: now + lifespan.min(MAX_LIFESPAN),
            },
        );

        tracing::debug!("stored token for {}", username);

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIFESPAN: Duration = Duration::from_secs(300);

    fn username(name: &str) -> Username {
        Username::parse(Some(name)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_after_set() {
        let store = MemoryStore::new();
        let alice = username("alice");
        let token = Token::generate();

        assert_eq!(store.get(&alice).await.unwrap(), None);
        assert!(store.set_with_expiry(&alice, &token, LIFESPAN).await.unwrap());
        assert_eq!(store.get(&alice).await.unwrap(), Some(token));
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_entry_is_not_overwritten() {
        let store = MemoryStore::new();
        let alice = username("alice");
        let first = Token::generate();

        assert!(store.set_with_expiry(&alice, &first, LIFESPAN).await.unwrap());
        assert!(
            !store
                .set_with_expiry(&alice, &Token::generate(), LIFESPAN)
                .await
                .unwrap()
        );
        assert_eq!(store.get(&alice).await.unwrap(), Some(first));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires() {
        let store = MemoryStore::new();
        let alice = username("alice");
        let first = Token::generate();

        store.set_with_expiry(&alice, &first, LIFESPAN).await.unwrap();

        tokio::time::advance(LIFESPAN - Duration::from_secs(1)).await;
        assert_eq!(store.get(&alice).await.unwrap(), Some(first));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(store.get(&alice).await.unwrap(), None);

        let second = Token::generate();
        assert!(store.set_with_expiry(&alice, &second, LIFESPAN).await.unwrap());
        assert_eq!(store.get(&alice).await.unwrap(), Some(second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entries_are_pruned_on_write() {
        let store = MemoryStore::new();

        store
            .set_with_expiry(&username("alice"), &Token::generate(), LIFESPAN)
            .await
            .unwrap();
        tokio::time::advance(LIFESPAN).await;
        store
            .set_with_expiry(&username("bob"), &Token::generate(), LIFESPAN)
            .await
            .unwrap();

        let entries = store.0.read().await;
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key(&username("bob")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_lifespan_is_clamped() {
        let store = MemoryStore::new();
        let alice = username("alice");
        let token = Token::generate();

        assert!(
            store
                .set_with_expiry(&alice, &token, Duration::from_secs((u64::MAX / 60) * 60))
                .await
                .unwrap()
        );
        assert_eq!(store.get(&alice).await.unwrap(), Some(token));

        tokio::time::advance(MAX_LIFESPAN).await;
        assert_eq!(store.get(&alice).await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_usernames_are_independent() {
        let store = MemoryStore::new();
        let alice = Token::generate();
        let bob = Token::generate();

        store.set_with_expiry(&username("alice"), &alice, LIFESPAN).await.unwrap();
        store.set_with_expiry(&username("bob"), &bob, LIFESPAN).await.unwrap();

        assert_eq!(store.get(&username("alice")).await.unwrap(), Some(alice));
        assert_eq!(store.get(&username("bob")).await.unwrap(), Some(bob));
    }
}
