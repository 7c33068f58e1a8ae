pub mod admin;
pub mod baselines;
pub mod geo;
pub mod health;
pub mod metrics;
pub mod scores;
pub mod tremors;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::ScoreWindow;

/// JSON envelope shared by every `/api` handler.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Window query parameter; 60m when absent.
fn parse_window(raw: Option<&str>) -> Result<ScoreWindow, AppError> {
    match raw {
        None => Ok(ScoreWindow::OneHour),
        Some(s) => s.parse().map_err(AppError::BadRequest),
    }
}
