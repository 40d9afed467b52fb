use chrono::{DateTime, Utc};
use derive_new::new;

use crate::model::{
    id::{ReservationId, ResourceId, TimeSlotId},
    reservation::{BookingDate, BookingTriple, Reservation, ReservationStatus},
};

#[derive(Debug, Clone, new)]
pub struct CreateReservation {
    pub date: BookingDate,
    pub time_slot_id: TimeSlotId,
    pub resource_id: ResourceId,
    pub user_name: String,
    pub email: String,
}

impl CreateReservation {
    pub fn triple(&self) -> BookingTriple {
        BookingTriple {
            date: self.date,
            time_slot_id: self.time_slot_id.clone(),
            resource_id: self.resource_id.clone(),
        }
    }

    // 保存する値とレスポンスで返す値を一致させるため、ID と参照番号はここで一度だけ採番する
    pub fn into_reservation(self, now: DateTime<Utc>) -> Reservation {
        let CreateReservation {
            date,
            time_slot_id,
            resource_id,
            user_name,
            email,
        } = self;
        Reservation {
            reservation_id: ReservationId::new(),
            date,
            time_slot_id,
            resource_id,
            user_name,
            email,
            status: ReservationStatus::Confirmed,
            reference: payment_reference(now),
            created_at: now,
        }
    }
}

pub fn payment_reference(now: DateTime<Utc>) -> String {
    format!("PAY-{}", now.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn into_reservation_copies_input_verbatim() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 6, 30, 0).unwrap();
        let event = CreateReservation::new(
            BookingDate::parse("2024-01-01").unwrap(),
            "t1".into(),
            "c1".into(),
            "Alice".into(),
            "alice@example.com".into(),
        );
        let triple = event.triple();

        let reservation = event.into_reservation(now);
        assert_eq!(reservation.triple(), triple);
        assert_eq!(reservation.user_name, "Alice");
        assert_eq!(reservation.email, "alice@example.com");
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.reference, format!("PAY-{}", now.timestamp()));
        assert_eq!(reservation.created_at, now);
    }
}
