use serde::Serialize;
use utoipa::ToSchema;

/// Confirmation returned by a successful mutation
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl From<String> for MessageResponse {
    fn from(message: String) -> Self {
        Self { message }
    }
}
