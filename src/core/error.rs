use axum::BoxError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::Display;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Reqwest error: {0}")]
    HTTPClient(#[from] reqwest::Error),
    #[error("Token lifespan must be between one minute and one year")]
    InvalidLifespan,
    #[error("Upstream credentials are not a valid header value")]
    InvalidCredentials,
}

/// Why a username was rejected before any store access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    MissingUsername,
    BlankUsername,
}

impl Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInput::MissingUsername => write!(f, "username is missing"),
            InvalidInput::BlankUsername => write!(f, "username is blank"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Reqwest error: {0}")]
    HTTPClient(#[from] reqwest::Error),
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(InvalidInput),
    #[error("No token exists for this username")]
    PreconditionFailed,
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] UpstreamError),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
    #[error("Malformed body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Unsupported media type")]
    UnsupportedMediaType,
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::UpstreamUnavailable(UpstreamError::HTTPClient(value))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, title, description) = match &self {
            Error::InvalidInput(InvalidInput::MissingUsername) => (
                StatusCode::BAD_REQUEST,
                "Missing parameter",
                r#"The "username" parameter is required."#,
            ),
            Error::InvalidInput(InvalidInput::BlankUsername) => (
                StatusCode::BAD_REQUEST,
                "Invalid parameter",
                "Username cannot be blank",
            ),
            Error::PreconditionFailed => (
                StatusCode::BAD_REQUEST,
                "Hash Missing",
                "A hash does not exist for this username. Run /v1/generate_hash first",
            ),
            Error::MalformedBody(_) => (
                StatusCode::BAD_REQUEST,
                "JSON Error",
                "You must specify a JSON-encoded body",
            ),
            Error::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported media type",
                "This API only supports JSON-encoded requests",
            ),
            Error::UpstreamUnavailable(_) => (
                StatusCode::BAD_GATEWAY,
                "Upstream unavailable",
                "The profile page could not be fetched, try again later",
            ),
            Error::StoreUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Store unavailable",
                "Internal server error",
            ),
        };

        if status.is_server_error() {
            tracing::error!("{:?}", self);
        } else {
            tracing::debug!("{}", self);
        }

        (
            status,
            Json(json!({ "title": title, "description": description })),
        )
            .into_response()
    }
}

pub(crate) async fn handle_middleware_errors(err: BoxError) -> (StatusCode, &'static str) {
    tracing::error!("Unhandled error: {:?}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}
