use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use derive_new::new;
use kernel::model::{
    booking::BookingEntry,
    reservation::{
        event::CreateReservation, BookingDate, BookingTriple, Reservation, SLOT_ALREADY_BOOKED,
    },
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::reservation::{BookingRow, ReservationRow},
    ConnectionPool,
};

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;

        // 事前のチェックとして、同じ日付・時間枠・コートの予約がないかを調べる
        {
            let existing: Option<(sqlx::types::Uuid,)> = sqlx::query_as(
                r#"
                    SELECT reservation_id
                    FROM reservations
                    WHERE booking_date = $1
                      AND time_slot_id = $2
                      AND resource_id = $3
                "#,
            )
            .bind(event.date.raw())
            .bind(event.time_slot_id.as_str())
            .bind(event.resource_id.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if existing.is_some() {
                return Err(AppError::Conflict(SLOT_ALREADY_BOOKED.into()));
            }
        }

        // TIMESTAMPTZ はマイクロ秒精度なので、返す値も保存される値に揃える
        let reservation = event.into_reservation(Utc::now().trunc_subsecs(6));

        // 同時に同じ枠へ INSERT された場合は一意制約により片方だけが成功し、
        // もう片方は 0 行となる
        let res = sqlx::query(
            r#"
                INSERT INTO reservations
                (reservation_id, booking_date, time_slot_id, resource_id,
                user_name, email, status, reference, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (booking_date, time_slot_id, resource_id) DO NOTHING
            "#,
        )
        .bind(reservation.reservation_id.raw())
        .bind(reservation.date.raw())
        .bind(reservation.time_slot_id.as_str())
        .bind(reservation.resource_id.as_str())
        .bind(&reservation.user_name)
        .bind(&reservation.email)
        .bind(reservation.status.to_string())
        .bind(&reservation.reference)
        .bind(reservation.created_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::Conflict(SLOT_ALREADY_BOOKED.into()));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation)
    }

    async fn find_by_triple(&self, triple: &BookingTriple) -> AppResult<Option<Reservation>> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
                SELECT
                reservation_id,
                booking_date,
                time_slot_id,
                resource_id,
                user_name,
                email,
                status,
                reference,
                created_at
                FROM reservations
                WHERE booking_date = $1
                  AND time_slot_id = $2
                  AND resource_id = $3
            "#,
        )
        .bind(triple.date.raw())
        .bind(triple.time_slot_id.as_str())
        .bind(triple.resource_id.as_str())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Reservation::try_from).transpose()
    }

    async fn find_by_date(&self, date: BookingDate) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT
                reservation_id,
                booking_date,
                time_slot_id,
                resource_id,
                user_name,
                email,
                status,
                reference,
                created_at
                FROM reservations
                WHERE booking_date = $1
                ORDER BY created_at ASC
            "#,
        )
        .bind(date.raw())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_booking_history(&self) -> AppResult<Vec<BookingEntry>> {
        // カタログ側が存在しない予約も残すため LEFT JOIN とする
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                r.booking_date,
                ts.start_time,
                ts.end_time,
                c.name AS resource_name,
                r.user_name
                FROM reservations AS r
                LEFT JOIN time_slots AS ts ON ts.time_slot_id = r.time_slot_id
                LEFT JOIN resources AS c ON c.resource_id = r.resource_id
                ORDER BY r.booking_date DESC, r.created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(BookingEntry::from).collect())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let res = sqlx::query("DELETE FROM reservations")
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(res.rows_affected())
    }
}
