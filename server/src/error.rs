//! Error types for the store and the HTTP layer.
//!
//! Every error leaves the server as a JSON body of the form
//! `{"error": "<message>"}` with a matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Title is required")]
    Validation,

    #[error("Todo not found")]
    NotFound(u64),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body was not valid JSON for the endpoint.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The `{id}` path segment was not an integer.
    #[error("Invalid todo id: {0}")]
    InvalidId(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Validation)
            | ApiError::InvalidBody(_)
            | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::from(StoreError::NotFound(7)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::Validation).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidId("abc".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_messages_match_wire_contract() {
        assert_eq!(
            ApiError::from(StoreError::Validation).to_string(),
            "Title is required"
        );
        assert_eq!(
            ApiError::from(StoreError::NotFound(3)).to_string(),
            "Todo not found"
        );
    }
}
