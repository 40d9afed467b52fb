use derive_new::new;

use crate::model::{reservation::BookingDate, time_slot::TimeRange};

/// 予約履歴の 1 行。
///
/// 予約はカタログへの参照整合性を持たないため、参照先の時間枠や
/// コートが存在しない場合は `None` になる（LEFT JOIN 相当）。
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct BookingEntry {
    pub date: BookingDate,
    pub time_range: Option<TimeRange>,
    pub resource_name: Option<String>,
    pub user_name: String,
}
