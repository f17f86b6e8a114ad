use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::CoreError;
use log::error;
use sea_orm::DbErr;
use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned by every endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    /// Stable machine-readable reason, e.g. `invariant_violation`
    pub reason: &'static str,
    /// Which rule was broken, for invariant violations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invariant: Option<&'static str>,
    pub message: String,
    #[serde(skip)]
    status: StatusCode,
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let status = match &err {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            CoreError::InvariantViolation { .. } => StatusCode::CONFLICT,
            CoreError::ConstraintConflict(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Store failures are logged in full but reported generically
        let message = if let CoreError::Database(e) = &err {
            error!("Database error: {e}");
            "Database operation failed".to_string()
        } else {
            err.to_string()
        };

        Self {
            reason: err.reason(),
            invariant: err.invariant().map(|invariant| invariant.code()),
            message,
            status,
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        CoreError::Database(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;
