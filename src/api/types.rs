use axum::{
    Json,
    http::header::CONTENT_RANGE,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Query string accepted by the list endpoints.
///
/// `name` (meals, ingredients) and `email` (users) switch the endpoint to
/// an unpaginated search.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A JSON array answered with `Content-Range: 0-9/{len}`.
pub struct Listing<T>(pub Vec<T>);

impl<T: Serialize> IntoResponse for Listing<T> {
    fn into_response(self) -> Response {
        let range = content_range(self.0.len());
        ([(CONTENT_RANGE, range)], Json(self.0)).into_response()
    }
}

#[must_use]
pub fn content_range(len: usize) -> String {
    format!("0-9/{len}")
}
