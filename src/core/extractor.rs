use std::error::Error as _;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// JSON body extractor whose rejections use the catalog error envelope.
///
/// Bodies that parse but do not fit the DTO (wrong type, missing field) are
/// reported as validation errors keyed by field, e.g. `precio: ...`.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The source carries the `field: message` form without axum's preamble
            let detail = err
                .source()
                .map(ToString::to_string)
                .unwrap_or_else(|| err.body_text());
            AppError::Validation(vec![field_error(&detail)])
        }
        JsonRejection::JsonSyntaxError(err) => {
            AppError::BadRequest(format!("Invalid JSON syntax: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::BadRequest("Expected request with `Content-Type: application/json`".to_string())
        }
        other => {
            tracing::debug!("Rejected JSON body: {}", other.body_text());
            AppError::BadRequest("Failed to parse JSON body".to_string())
        }
    }
}

/// Rewrite a deserializer message into `field: message`, dropping the
/// line/column suffix.
fn field_error(detail: &str) -> String {
    let detail = detail
        .split(" at line ")
        .next()
        .unwrap_or(detail)
        .trim();

    if let Some(rest) = detail.strip_prefix("missing field `") {
        if let Some((field, _)) = rest.split_once('`') {
            return format!("{}: this field is required", field);
        }
    }

    detail.to_string()
}
