use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use std::time::Duration;
use tracing::instrument;

use crate::core::config::MAX_LIFESPAN;
use crate::core::error::{ConfigError, Error};
use crate::token::store::TokenStore;
use crate::types::{Token, Username};

/// Token store backed by the `verification_tokens` table.
#[derive(Clone, Debug)]
pub(crate) struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub(crate) async fn connect(database_url: &str) -> Result<Self, ConfigError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::migrate!().run(&pool).await?;

        Ok(Self::from_pool(pool))
    }

    pub(crate) fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenStore for PgStore {
    #[instrument(skip_all)]
    async fn get(&self, username: &Username) -> Result<Option<Token>, Error> {
        let token = sqlx::query(
            "SELECT token FROM verification_tokens
            WHERE username = $1 AND expires_at > now();",
        )
        .bind(username.as_str())
        .map(|row: PgRow| Token::from(row.get::<String, _>("token")))
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }

    #[instrument(skip_all)]
    async fn set_with_expiry(
        &self,
        username: &Username,
        token: &Token,
        lifespan: Duration,
    ) -> Result<bool, Error> {
        // The conflict update only fires for an expired row, so a live token
        // yields no returned row.
        let expires_at = sqlx::query(
            "INSERT INTO verification_tokens (username, token, expires_at)
            VALUES ($1, $2, now() + make_interval(secs => $3))
            ON CONFLICT (username) DO UPDATE
                SET token = EXCLUDED.token,
                    created_at = now(),
                    expires_at = EXCLUDED.expires_at
                WHERE verification_tokens.expires_at <= now()
            RETURNING expires_at;",
        )
        .bind(username.as_str())
        .bind(token.as_str())
        .bind(lifespan.min(MAX_LIFESPAN).as_secs_f64())
        .map(|row: PgRow| row.get::<DateTime<Utc>, _>("expires_at"))
        .fetch_optional(&self.pool)
        .await?;

        match expires_at {
            Some(expires_at) => {
                tracing::debug!("stored token for {} until {}", username, expires_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
