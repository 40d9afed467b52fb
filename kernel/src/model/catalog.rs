use chrono::NaiveTime;

use crate::model::{resource::Resource, time_slot::TimeSlot};

/// 起動時に投入するコートと時間枠の一覧
#[derive(Debug, Clone)]
pub struct Catalog {
    pub resources: Vec<Resource>,
    pub time_slots: Vec<TimeSlot>,
}

impl Catalog {
    pub fn studio() -> Self {
        let resources = [
            ("c1", "Reformer Studio A"),
            ("c2", "Reformer Studio B"),
            ("c3", "Private Suite"),
        ]
        .into_iter()
        .map(|(id, name)| Resource::new(id.into(), name.into()))
        .collect();

        let time_slots = [
            ("t1", 7, 8),
            ("t2", 8, 9),
            ("t3", 9, 10),
            ("t4", 17, 18),
            ("t5", 18, 19),
            ("t6", 19, 20),
        ]
        .into_iter()
        .filter_map(|(id, start, end)| {
            Some(TimeSlot::new(
                id.into(),
                NaiveTime::from_hms_opt(start, 0, 0)?,
                NaiveTime::from_hms_opt(end, 0, 0)?,
            ))
        })
        .collect();

        Self {
            resources,
            time_slots,
        }
    }
}
