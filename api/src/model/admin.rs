use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub message: String,
}
