use chrono::NaiveDate;
use garde::Validate;
use kernel::model::{
    id::{PersonId, ScheduleId},
    schedule::{
        event::{CreateSchedule, UpdateSchedule},
        Schedule,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    #[garde(skip)]
    pub day: NaiveDate,
    #[garde(range(min = 0, max = 23))]
    pub hour: i16,
}

impl CreateScheduleRequest {
    pub fn into_event(self, person_id: PersonId) -> CreateSchedule {
        CreateSchedule::new(person_id, self.day, self.hour)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    #[garde(skip)]
    pub day: NaiveDate,
    #[garde(range(min = 0, max = 23))]
    pub hour: i16,
}

impl UpdateScheduleRequest {
    pub fn into_event(self, schedule_id: ScheduleId, person_id: PersonId) -> UpdateSchedule {
        UpdateSchedule::new(schedule_id, person_id, self.day, self.hour)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulesResponse {
    pub items: Vec<ScheduleResponse>,
}

impl From<Vec<Schedule>> for SchedulesResponse {
    fn from(value: Vec<Schedule>) -> Self {
        Self {
            items: value.into_iter().map(ScheduleResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub schedule_id: ScheduleId,
    pub person_id: PersonId,
    pub day: NaiveDate,
    pub hour: i16,
}

impl From<Schedule> for ScheduleResponse {
    fn from(value: Schedule) -> Self {
        let Schedule {
            schedule_id,
            person_id,
            day,
            hour,
        } = value;
        Self {
            schedule_id,
            person_id,
            day,
            hour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_schedule_request_rejects_out_of_range_hour() {
        let ok: CreateScheduleRequest =
            serde_json::from_value(serde_json::json!({"day": "2023-09-15", "hour": 12})).unwrap();
        assert!(ok.validate(&()).is_ok());

        let bad: CreateScheduleRequest =
            serde_json::from_value(serde_json::json!({"day": "2023-09-15", "hour": 24})).unwrap();
        assert!(bad.validate(&()).is_err());
    }

    #[test]
    fn update_schedule_request_rejects_out_of_range_hour() {
        let bad: UpdateScheduleRequest =
            serde_json::from_value(serde_json::json!({"day": "2023-09-15", "hour": -1})).unwrap();
        assert!(bad.validate(&()).is_err());
    }
}
