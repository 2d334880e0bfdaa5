use crate::model::id::{PersonId, ScheduleId};
use chrono::NaiveDate;

pub mod event;

// 1 時間単位の空き枠。予約済みかどうかはこの型では持たず、
// Booking からの参照の有無で導出する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub schedule_id: ScheduleId,
    pub person_id: PersonId,
    pub day: NaiveDate,
    pub hour: i16,
}
