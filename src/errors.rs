use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::ConfigError;
use crate::domain::errors::{EnqueueError, ValidationError};

/// Per-request failure, mapped to an HTTP response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Rejected: {0}")]
    Rejected(#[from] ValidationError),

    #[error("Failed: {0}")]
    Failed(#[from] EnqueueError),
}

/// Error body returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// `Malformed`, `SemanticViolation`, `StoreUnavailable` or `StoreRejected`.
    pub error: String,
    /// Offending field, for semantic violations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub detail: String,
}

impl AppError {
    pub fn body(&self) -> ErrorBody {
        match self {
            AppError::Rejected(e) => ErrorBody {
                error: e.kind().to_string(),
                field: e.field().map(str::to_string),
                detail: e.detail().to_string(),
            },
            AppError::Failed(e) => ErrorBody {
                error: e.kind().to_string(),
                field: None,
                detail: e.detail().to_string(),
            },
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Rejected(_) => StatusCode::BAD_REQUEST,
            AppError::Failed(EnqueueError::StoreUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Failed(EnqueueError::StoreRejected(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

/// Anything that keeps the service from reaching the serving state.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid queue store client settings: {0}")]
    Client(#[from] redis::RedisError),

    #[error("Queue store not reachable: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Queue store failed the startup check: {0}")]
    StoreCheck(#[from] EnqueueError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
