use crate::model::meeting::{
    AvailableMeetingsResponse, BookMeetingRequest, BookingResponse, BookingsResponse, MeetingQuery,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::{BookingId, PersonId, ScheduleId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn query_meetings(
    Query(query): Query<MeetingQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailableMeetingsResponse>> {
    let interviewer_ids = query.interviewer_ids()?;

    registry
        .meeting_repository()
        .query(query.candidate_id, &interviewer_ids)
        .await
        .map(AvailableMeetingsResponse::from)
        .map(Json)
}

pub async fn book_meeting(
    Path(schedule_id): Path<ScheduleId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<BookMeetingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    req.validate(&())?;

    registry
        .meeting_repository()
        .book(req.into_event(schedule_id))
        .await
        .map(BookingResponse::from)
        .map(|booking| (StatusCode::CREATED, Json(booking)))
}

pub async fn show_meeting(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .meeting_repository()
        .find_by_id(booking_id)
        .await
        .and_then(|booking| match booking {
            Some(booking) => Ok(Json(booking.into())),
            None => Err(AppError::EntityNotFound(format!(
                "meeting {booking_id} is not found"
            ))),
        })
}

pub async fn cancel_meeting(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .meeting_repository()
        .cancel(booking_id)
        .await
        .and_then(|booking| match booking {
            // 取り消した予約を、削除直前の状態で返す
            Some(booking) => Ok(Json(booking.into())),
            None => Err(AppError::EntityNotFound(format!(
                "meeting {booking_id} is not found"
            ))),
        })
}

pub async fn show_candidate_meetings(
    Path(person_id): Path<PersonId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .meeting_repository()
        .find_by_owner_person(person_id)
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_interviewer_meetings(
    Path(person_id): Path<PersonId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .meeting_repository()
        .find_by_child_person(person_id)
        .await
        .map(BookingsResponse::from)
        .map(Json)
}
