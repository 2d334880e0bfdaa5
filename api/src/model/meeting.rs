use crate::model::{person::PersonResponse, schedule::ScheduleResponse};
use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{BookingId, PersonId, ScheduleId},
    meeting::{event::BookMeeting, AvailableMeeting, Booking},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingQuery {
    pub candidate_id: PersonId,
    // カンマ区切りの面接官 ID。省略時はすべての面接官を対象にする
    #[serde(default)]
    pub interviewer_ids: Option<String>,
}

impl MeetingQuery {
    pub fn interviewer_ids(&self) -> AppResult<Vec<PersonId>> {
        match &self.interviewer_ids {
            None => Ok(Vec::new()),
            Some(raw) => raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| PersonId::from_str(s.trim()))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| {
                    AppError::UnprocessableEntity(format!(
                        "interviewerIds must be a comma separated list of ids: {raw}"
                    ))
                }),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookMeetingRequest {
    #[garde(skip)]
    pub candidate_id: PersonId,
    #[garde(length(min = 1))]
    pub interviewer_ids: Vec<PersonId>,
}

impl BookMeetingRequest {
    pub fn into_event(self, schedule_id: ScheduleId) -> BookMeeting {
        let BookMeetingRequest {
            candidate_id,
            interviewer_ids,
        } = self;
        BookMeeting::new(schedule_id, candidate_id, interviewer_ids)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableMeetingsResponse {
    pub items: Vec<AvailableMeetingResponse>,
}

impl From<Vec<AvailableMeeting>> for AvailableMeetingsResponse {
    fn from(value: Vec<AvailableMeeting>) -> Self {
        Self {
            items: value
                .into_iter()
                .map(AvailableMeetingResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableMeetingResponse {
    pub candidate_schedule: ScheduleResponse,
    pub available_interviewers: Vec<PersonResponse>,
}

impl From<AvailableMeeting> for AvailableMeetingResponse {
    fn from(value: AvailableMeeting) -> Self {
        let AvailableMeeting {
            candidate_schedule,
            interviewers,
        } = value;
        Self {
            candidate_schedule: candidate_schedule.into(),
            available_interviewers: interviewers.into_iter().map(PersonResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: BookingId,
    pub created_at: DateTime<Utc>,
    pub owner_schedule: ScheduleResponse,
    pub children_schedules: Vec<ScheduleResponse>,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            created_at,
            owner_schedule,
            children_schedules,
        } = value;
        Self {
            booking_id,
            created_at,
            owner_schedule: owner_schedule.into(),
            children_schedules: children_schedules
                .into_iter()
                .map(ScheduleResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn meeting_query_parses_comma_separated_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let query = MeetingQuery {
            candidate_id: PersonId::new(),
            interviewer_ids: Some(format!("{a}, {b}")),
        };

        let ids = query.interviewer_ids().unwrap();
        assert_eq!(ids, vec![PersonId::from(a), PersonId::from(b)]);
    }

    #[test]
    fn meeting_query_without_ids_means_all_interviewers() {
        let query = MeetingQuery {
            candidate_id: PersonId::new(),
            interviewer_ids: None,
        };
        assert!(query.interviewer_ids().unwrap().is_empty());
    }

    #[test]
    fn meeting_query_rejects_garbage_ids() {
        let query = MeetingQuery {
            candidate_id: PersonId::new(),
            interviewer_ids: Some("not-a-uuid".into()),
        };
        assert!(matches!(
            query.interviewer_ids(),
            Err(AppError::UnprocessableEntity(_))
        ));
    }

    #[test]
    fn book_meeting_request_requires_interviewers() {
        let empty = BookMeetingRequest {
            candidate_id: PersonId::new(),
            interviewer_ids: vec![],
        };
        assert!(empty.validate(&()).is_err());

        let ok = BookMeetingRequest {
            candidate_id: PersonId::new(),
            interviewer_ids: vec![PersonId::new()],
        };
        assert!(ok.validate(&()).is_ok());
    }
}
