use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("データベース接続に失敗しました。")]
    ConnectionError(#[source] sqlx::Error),
    #[error("マイグレーションに失敗しました。")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理実行中にエラーが発生しました。")]
    SpecificOperationError(#[source] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ConversionEntityError(_)
            | AppError::ConnectionError(_)
            | AppError::MigrationError(_)
            | AppError::TransactionError(_)
            | AppError::SpecificOperationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        // 5xx の詳細はログにのみ出し、レスポンスには汎用メッセージを返す
        let message = if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            "Internal Server Error".to_string()
        } else {
            tracing::info!(status = %status_code, error.message = %self, "Request rejected");
            self.to_string()
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

// 本文が JSON として読めない場合 (構文エラー、型の不一致、Content-Type 欠落) はすべて 400 とする
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
