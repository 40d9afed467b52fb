use std::fmt;

use chrono::NaiveTime;
use derive_new::new;

use crate::model::id::TimeSlotId;

pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TimeSlot {
    pub time_slot_id: TimeSlotId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl TimeSlot {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

/// 予約履歴に表示する "HH:MM - HH:MM" 形式の時間帯
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(TIME_OF_DAY_FORMAT),
            self.end.format(TIME_OF_DAY_FORMAT)
        )
    }
}

pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_OF_DAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_renders_hours_and_minutes() {
        let slot = TimeSlot::new(
            "t1".into(),
            NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        );
        assert_eq!(slot.range().to_string(), "07:00 - 08:00");
        assert_eq!(format_time_of_day(slot.end_time), "08:00");
    }
}
