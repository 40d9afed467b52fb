use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::admin::ResetResponse;

// 確認なしで全予約を削除する（テスト・デモ環境向け）
pub async fn reset_reservations(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ResetResponse>> {
    let deleted = registry.reservation_repository().delete_all().await?;
    tracing::warn!(deleted, "All reservations have been deleted");

    Ok(Json(ResetResponse {
        message: "System reset successfully".into(),
    }))
}
