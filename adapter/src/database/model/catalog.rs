use kernel::model::{resource::Resource, time_slot::TimeSlot};
use sqlx::types::chrono::NaiveTime;

#[derive(sqlx::FromRow)]
pub struct ResourceRow {
    pub resource_id: String,
    pub name: String,
}

impl From<ResourceRow> for Resource {
    fn from(value: ResourceRow) -> Self {
        let ResourceRow { resource_id, name } = value;
        Resource::new(resource_id.into(), name)
    }
}

#[derive(sqlx::FromRow)]
pub struct TimeSlotRow {
    pub time_slot_id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<TimeSlotRow> for TimeSlot {
    fn from(value: TimeSlotRow) -> Self {
        let TimeSlotRow {
            time_slot_id,
            start_time,
            end_time,
        } = value;
        TimeSlot::new(time_slot_id.into(), start_time, end_time)
    }
}
