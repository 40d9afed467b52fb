use kernel::model::{booking::BookingEntry, reservation::BookingDate};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub date: BookingDate,
    pub time: String,
    pub studio: String,
    pub user_name: String,
}

// カタログ側が見つからない項目は空文字で返す
impl From<BookingEntry> for BookingResponse {
    fn from(value: BookingEntry) -> Self {
        let BookingEntry {
            date,
            time_range,
            resource_name,
            user_name,
        } = value;
        Self {
            date,
            time: time_range.map(|r| r.to_string()).unwrap_or_default(),
            studio: resource_name.unwrap_or_default(),
            user_name,
        }
    }
}
