use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{resource::Resource, time_slot::TimeSlot};

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // コート一覧を ID 順に取得する
    async fn find_all_resources(&self) -> AppResult<Vec<Resource>>;
    // 時間枠一覧を開始時刻順に取得する
    async fn find_all_time_slots(&self) -> AppResult<Vec<TimeSlot>>;
    // 未登録の ID のみ追加する。既存の行は上書きしない。追加した件数を返す
    async fn ensure_seeded(
        &self,
        resources: &[Resource],
        time_slots: &[TimeSlot],
    ) -> AppResult<u64>;
}
