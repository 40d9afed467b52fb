use crate::model::{
    booking::BookingEntry,
    reservation::{event::CreateReservation, BookingDate, BookingTriple, Reservation},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// 予約操作を行う。
    ///
    /// 同じ日付・時間枠・コートの予約が既にあれば `AppError::Conflict` を返し、
    /// 何も書き込まない。確認と追加は 1 つの原子的な処理として行う。
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation>;
    // 日付・時間枠・コートが完全一致する予約を取得する
    async fn find_by_triple(&self, triple: &BookingTriple) -> AppResult<Option<Reservation>>;
    // 指定日の予約一覧を取得する
    async fn find_by_date(&self, date: BookingDate) -> AppResult<Vec<Reservation>>;
    // 予約履歴を日付の新しい順に取得する
    async fn find_booking_history(&self) -> AppResult<Vec<BookingEntry>>;
    // すべての予約を削除し、削除件数を返す
    async fn delete_all(&self) -> AppResult<u64>;
}
