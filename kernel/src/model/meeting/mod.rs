use crate::model::{id::BookingId, person::Person, schedule::Schedule};
use chrono::{DateTime, Utc};

pub mod event;

// 候補者スロット 1 件と面接官スロット N 件を束ねた確定済みミーティング
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub booking_id: BookingId,
    pub created_at: DateTime<Utc>,
    pub owner_schedule: Schedule,
    pub children_schedules: Vec<Schedule>,
}

// 空き照会の結果。永続化はされず、クエリ応答としてのみ存在する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableMeeting {
    pub candidate_schedule: Schedule,
    pub interviewers: Vec<Person>,
}

// マッチング入力となる面接官ごとのスナップショット
#[derive(Debug, Clone)]
pub struct InterviewerSlots {
    pub interviewer: Person,
    pub free_slots: Vec<Schedule>,
}
