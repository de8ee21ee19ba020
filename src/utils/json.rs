use axum::{
    body::Body,
    extract::Request,
    http::{Method, Response, header},
    middleware::Next,
};

use crate::core::error::Error;

/// Rejects POST requests that are not `application/json`.
pub(crate) async fn require_json(request: Request, next: Next) -> Result<Response<Body>, Error> {
    if request.method() == Method::POST {
        let is_json = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));

        if !is_json {
            return Err(Error::UnsupportedMediaType);
        }
    }

    Ok(next.run(request).await)
}
