use http::StatusCode;
use serde_json::json;
use tracing::{debug, error};

use crate::api::validate::Field;
use crate::model::{MalformedId, PostId};
use crate::response::{IntoResponse, Response};
use crate::store::StoreError;

/// Everything a posts handler can fail with.
///
/// The `Display` text is what the caller receives as `message`, so store
/// failures render generically; their cause is only logged.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing `{0}` in request body")]
    Validation(Field),

    #[error(transparent)]
    MalformedId(#[from] MalformedId),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Post {0} not found")]
    NotFound(PostId),

    #[error("Internal server error")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedId(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Store(cause) => error!(error = %cause, "store operation failed"),
            other => debug!(error = %other, "request rejected"),
        }
        Response::builder()
            .status(self.status())
            .json(&json!({ "message": self.to_string() }))
    }
}
