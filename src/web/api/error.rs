use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::ephemeris::EphemerisError;
use crate::feed::FeedError;

pub enum ApiError {
    Ephemeris(EphemerisError),
    Feed(FeedError),
}

impl From<EphemerisError> for ApiError {
    fn from(e: EphemerisError) -> Self {
        ApiError::Ephemeris(e)
    }
}

impl From<FeedError> for ApiError {
    fn from(e: FeedError) -> Self {
        match e {
            FeedError::Record(e) => ApiError::Ephemeris(e),
            _ => ApiError::Feed(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Ephemeris(e) => {
                let (status, error) = match e {
                    EphemerisError::InvalidArgument(_) => {
                        (StatusCode::BAD_REQUEST, "invalid_argument")
                    }
                    EphemerisError::NotFound { .. } => (StatusCode::NOT_FOUND, "epoch_not_found"),
                    EphemerisError::EmptySeries => {
                        (StatusCode::SERVICE_UNAVAILABLE, "no_epochs_loaded")
                    }
                    EphemerisError::MalformedTimestamp(_) | EphemerisError::InvalidRecord { .. } => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "invalid_feed_data")
                    }
                };
                (status, error, e.to_string())
            }
            ApiError::Feed(e) => {
                log::error!("Feed reload failed: {}", e);
                (StatusCode::BAD_GATEWAY, "feed_unavailable", e.to_string())
            }
        };

        (status, Json(ErrorResponse::with_message(error, &message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
