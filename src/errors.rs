use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".into()),
            AppError::InsufficientData(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.into())
    }
}

impl From<ScoringError> for AppError {
    fn from(e: ScoringError) -> Self {
        match e {
            ScoringError::Upstream(inner) => AppError::Internal(inner),
            other => AppError::InsufficientData(other.to_string()),
        }
    }
}

/// Typed outcome of score and baseline computations. Insufficient data is an
/// expected result that callers branch on; only `Upstream` is a real failure.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("no instruments found for event {event_id}")]
    NoInstruments { event_id: String },

    #[error("instrument {instrument_id} has {found} snapshots, need at least {required}")]
    InsufficientSnapshots {
        instrument_id: String,
        found: usize,
        required: usize,
    },

    #[error("instrument {instrument_id} has no valid returns")]
    NoValidReturns { instrument_id: String },

    #[error("upstream store unavailable: {0}")]
    Upstream(#[from] anyhow::Error),
}

impl ScoringError {
    pub fn is_insufficient_data(&self) -> bool {
        !matches!(self, ScoringError::Upstream(_))
    }
}
