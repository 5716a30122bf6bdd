use api_shared::ErrorRes;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use spots_core::StorageError;

use crate::html;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the JSON API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Expected 'application/json' request body")]
    UnsupportedMediaType,
    #[error("Malformed JSON body")]
    MalformedBody,
    #[error("Missing required fields")]
    MissingFields(Vec<String>),
    #[error("Spot not found")]
    SpotNotFound(String),
    /// The store refused a write; reported to the client as a bad request.
    #[error("{0}")]
    Rejected(StorageError),
    /// The store failed while serving a read.
    #[error("{0}")]
    Storage(StorageError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::MalformedBody | Self::MissingFields(_) | Self::Rejected(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::SpotNotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::MissingFields(fields) => ErrorRes::missing_fields(fields),
            Self::SpotNotFound(spot_id) => ErrorRes::spot_not_found(spot_id),
            other => ErrorRes::new(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// Errors returned by the admin pages, rendered as HTML.
#[derive(Debug)]
pub struct AdminError {
    status: StatusCode,
    message: String,
}

impl AdminError {
    pub fn spot_not_found(spot_id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("Spot '{spot_id}' not found"),
        }
    }
}

impl From<StorageError> for AdminError {
    fn from(e: StorageError) -> Self {
        tracing::error!("Admin storage error: {:?}", e);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        (self.status, html::error_page(self.status, &self.message)).into_response()
    }
}
