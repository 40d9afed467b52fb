use kernel::model::{
    booking::BookingEntry,
    reservation::{Reservation, ReservationStatus},
    time_slot::TimeRange,
};
use shared::error::AppError;
use sqlx::types::{
    chrono::{DateTime, NaiveDate, NaiveTime, Utc},
    Uuid,
};

// reservations テーブルの 1 行
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: Uuid,
    pub booking_date: NaiveDate,
    pub time_slot_id: String,
    pub resource_id: String,
    pub user_name: String,
    pub email: String,
    pub status: String,
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            booking_date,
            time_slot_id,
            resource_id,
            user_name,
            email,
            status,
            reference,
            created_at,
        } = value;
        let status = status.parse::<ReservationStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!(
                "unknown reservation status {status:?} on {reservation_id}"
            ))
        })?;
        Ok(Reservation {
            reservation_id: reservation_id.into(),
            date: booking_date.into(),
            time_slot_id: time_slot_id.into(),
            resource_id: resource_id.into(),
            user_name,
            email,
            status,
            reference,
            created_at,
        })
    }
}

// 予約履歴の取得に使う型
// LEFT JOIN のため、カタログ側の列は NULL になりうる
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub resource_name: Option<String>,
    pub user_name: String,
}

impl From<BookingRow> for BookingEntry {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_date,
            start_time,
            end_time,
            resource_name,
            user_name,
        } = value;
        let time_range = start_time
            .zip(end_time)
            .map(|(start, end)| TimeRange::new(start, end));
        BookingEntry::new(booking_date.into(), time_range, resource_name, user_name)
    }
}
