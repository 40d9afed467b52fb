use garde::Validate;
use kernel::model::{
    availability::Availability,
    id::{ResourceId, TimeSlotId},
    resource::Resource,
    time_slot::{format_time_of_day, TimeSlot},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
pub struct AvailabilityQuery {
    #[serde(default)]
    #[garde(length(min = 1))]
    pub date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub resources: Vec<ResourceResponse>,
    pub time_slots: Vec<TimeSlotResponse>,
    pub booked_slots: Vec<String>,
}

impl From<Availability> for AvailabilityResponse {
    fn from(value: Availability) -> Self {
        let Availability {
            resources,
            time_slots,
            booked_slots,
        } = value;
        Self {
            resources: resources.into_iter().map(ResourceResponse::from).collect(),
            time_slots: time_slots.into_iter().map(TimeSlotResponse::from).collect(),
            booked_slots,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: ResourceId,
    pub name: String,
}

impl From<Resource> for ResourceResponse {
    fn from(value: Resource) -> Self {
        let Resource { resource_id, name } = value;
        Self {
            id: resource_id,
            name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotResponse {
    pub id: TimeSlotId,
    pub start_time: String,
    pub end_time: String,
}

impl From<TimeSlot> for TimeSlotResponse {
    fn from(value: TimeSlot) -> Self {
        let TimeSlot {
            time_slot_id,
            start_time,
            end_time,
        } = value;
        Self {
            id: time_slot_id,
            start_time: format_time_of_day(start_time),
            end_time: format_time_of_day(end_time),
        }
    }
}
