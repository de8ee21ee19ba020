use axum::Json;
use axum::body::Bytes;
use axum::extract::State;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::UsernameParams;
use crate::types::response;

pub(crate) async fn generate_hash(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<response::Hash>, Error> {
    let username = UsernameParams::from_body(&body)?.username()?;

    let token = state.verification.issue(&username).await?;

    Ok(Json(response::Hash {
        hash: token.into_inner(),
    }))
}

pub(crate) async fn validate_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<response::Validated>, Error> {
    let username = UsernameParams::from_body(&body)?.username()?;

    let validated = state.verification.validate(&username).await?;

    Ok(Json(response::Validated { validated }))
}
