use crate::model::id::{PersonId, ScheduleId};
use chrono::NaiveDate;
use derive_new::new;

#[derive(new)]
pub struct CreateSchedule {
    pub person_id: PersonId,
    pub day: NaiveDate,
    pub hour: i16,
}

// 未予約のスロットの (day, hour) を付け替える
#[derive(new)]
pub struct UpdateSchedule {
    pub schedule_id: ScheduleId,
    pub person_id: PersonId,
    pub day: NaiveDate,
    pub hour: i16,
}

#[derive(Debug, new)]
pub struct DeleteSchedule {
    pub schedule_id: ScheduleId,
    pub person_id: PersonId,
}
