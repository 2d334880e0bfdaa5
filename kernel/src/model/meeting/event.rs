use crate::model::id::{PersonId, ScheduleId};
use derive_new::new;

#[derive(Debug, new)]
pub struct BookMeeting {
    pub schedule_id: ScheduleId,
    pub candidate_id: PersonId,
    pub interviewer_ids: Vec<PersonId>,
}
