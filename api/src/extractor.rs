use axum::extract::FromRequest;
use shared::error::AppError;

/// `axum::Json` と同じだが、読み取りに失敗したときも `{"error": ...}` の形で 400 を返す。
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
