use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

use crate::model::id::{ReservationId, ResourceId, TimeSlotId};

pub mod event;

pub const BOOKING_DATE_FORMAT: &str = "%Y-%m-%d";

pub const SLOT_ALREADY_BOOKED: &str = "slot already booked";

#[derive(Debug, Clone)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub date: BookingDate,
    pub time_slot_id: TimeSlotId,
    pub resource_id: ResourceId,
    pub user_name: String,
    pub email: String,
    pub status: ReservationStatus,
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn triple(&self) -> BookingTriple {
        BookingTriple {
            date: self.date,
            time_slot_id: self.time_slot_id.clone(),
            resource_id: self.resource_id.clone(),
        }
    }
}

// 予約状態。キャンセル処理は存在しないため confirmed のみ
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
}

/// 予約対象日。`YYYY-MM-DD` の正規形のみ受け付ける。
///
/// 正規形以外（`2024-1-1` など）を弾くことで、文字列としての一致と
/// 日付としての一致が常に同じになる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookingDate(NaiveDate);

impl BookingDate {
    pub fn parse(value: &str) -> AppResult<Self> {
        let invalid = || {
            AppError::InvalidRequest(format!(
                "date must be a calendar date in YYYY-MM-DD form: {value:?}"
            ))
        };
        let date = NaiveDate::parse_from_str(value, BOOKING_DATE_FORMAT).map_err(|_| invalid())?;
        if date.format(BOOKING_DATE_FORMAT).to_string() != value {
            return Err(invalid());
        }
        Ok(Self(date))
    }

    pub fn raw(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for BookingDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl fmt::Display for BookingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BOOKING_DATE_FORMAT))
    }
}

impl Serialize for BookingDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 重複予約を判定するキー（日付・時間枠・コート）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingTriple {
    pub date: BookingDate,
    pub time_slot_id: TimeSlotId,
    pub resource_id: ResourceId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_date_accepts_canonical_form() {
        let date = BookingDate::parse("2024-01-01").unwrap();
        assert_eq!(date.to_string(), "2024-01-01");
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-01-01\"");
    }

    #[test]
    fn booking_date_rejects_non_canonical_input() {
        for input in ["", "2024-1-1", "2024-01-01 ", "01/01/2024", "2024-02-30", "tomorrow"] {
            let err = BookingDate::parse(input).unwrap_err();
            assert!(matches!(err, AppError::InvalidRequest(_)), "{input:?}");
        }
    }

    #[test]
    fn status_uses_lowercase_names() {
        assert_eq!(ReservationStatus::Confirmed.to_string(), "confirmed");
        assert_eq!(
            "confirmed".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Confirmed
        );
    }
}
