use chrono::NaiveDate;
use kernel::model::{
    id::{PersonId, ScheduleId},
    schedule::Schedule,
};

#[derive(sqlx::FromRow)]
pub struct ScheduleRow {
    pub schedule_id: ScheduleId,
    pub person_id: PersonId,
    pub day: NaiveDate,
    pub hour: i16,
}

impl From<ScheduleRow> for Schedule {
    fn from(value: ScheduleRow) -> Self {
        let ScheduleRow {
            schedule_id,
            person_id,
            day,
            hour,
        } = value;
        Schedule {
            schedule_id,
            person_id,
            day,
            hour,
        }
    }
}

// 予約状態込みでスロットを読むための型。
// is_free は owner/parent どちらの参照も無いことを意味する
#[derive(sqlx::FromRow)]
pub struct ScheduleStateRow {
    pub schedule_id: ScheduleId,
    pub person_id: PersonId,
    pub day: NaiveDate,
    pub hour: i16,
    pub is_free: bool,
}
