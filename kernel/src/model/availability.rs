use crate::model::{
    id::{ResourceId, TimeSlotId},
    reservation::{BookingDate, Reservation},
    resource::Resource,
    time_slot::TimeSlot,
};

/// 指定日の空き状況。カタログは日付に依存しない全件を返す。
#[derive(Debug)]
pub struct Availability {
    pub resources: Vec<Resource>,
    pub time_slots: Vec<TimeSlot>,
    pub booked_slots: Vec<String>,
}

impl Availability {
    pub fn compose(
        date: BookingDate,
        resources: Vec<Resource>,
        time_slots: Vec<TimeSlot>,
        reservations: &[Reservation],
    ) -> Self {
        // 同一日付内では (コート, 時間枠) が一意なので重複排除は不要
        let booked_slots = reservations
            .iter()
            .filter(|r| r.date == date)
            .map(|r| booked_slot_key(&r.resource_id, &r.time_slot_id))
            .collect();
        Self {
            resources,
            time_slots,
            booked_slots,
        }
    }
}

pub fn booked_slot_key(resource_id: &ResourceId, time_slot_id: &TimeSlotId) -> String {
    format!("{resource_id}_{time_slot_id}")
}
