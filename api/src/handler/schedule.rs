use crate::model::schedule::{
    CreateScheduleRequest, ScheduleResponse, SchedulesResponse, UpdateScheduleRequest,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::{PersonId, ScheduleId},
    role::Role,
    schedule::event::DeleteSchedule,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_candidate_schedule(
    Path(person_id): Path<PersonId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateScheduleRequest>,
) -> AppResult<(StatusCode, Json<ScheduleId>)> {
    register_schedule(registry, person_id, Role::Candidate, req).await
}

pub async fn register_interviewer_schedule(
    Path(person_id): Path<PersonId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateScheduleRequest>,
) -> AppResult<(StatusCode, Json<ScheduleId>)> {
    register_schedule(registry, person_id, Role::Interviewer, req).await
}

async fn register_schedule(
    registry: AppRegistry,
    person_id: PersonId,
    role: Role,
    req: CreateScheduleRequest,
) -> AppResult<(StatusCode, Json<ScheduleId>)> {
    req.validate(&())?;
    ensure_person(&registry, person_id, role).await?;

    registry
        .schedule_repository()
        .create(req.into_event(person_id))
        .await
        .map(|schedule_id| (StatusCode::CREATED, Json(schedule_id)))
}

pub async fn show_candidate_schedules(
    Path(person_id): Path<PersonId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SchedulesResponse>> {
    show_schedules(registry, person_id, Role::Candidate).await
}

pub async fn show_interviewer_schedules(
    Path(person_id): Path<PersonId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SchedulesResponse>> {
    show_schedules(registry, person_id, Role::Interviewer).await
}

async fn show_schedules(
    registry: AppRegistry,
    person_id: PersonId,
    role: Role,
) -> AppResult<Json<SchedulesResponse>> {
    ensure_person(&registry, person_id, role).await?;

    registry
        .schedule_repository()
        .find_by_person_id(person_id)
        .await
        .map(SchedulesResponse::from)
        .map(Json)
}

pub async fn show_candidate_schedule(
    Path((person_id, schedule_id)): Path<(PersonId, ScheduleId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ScheduleResponse>> {
    show_schedule(registry, person_id, schedule_id, Role::Candidate).await
}

pub async fn show_interviewer_schedule(
    Path((person_id, schedule_id)): Path<(PersonId, ScheduleId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ScheduleResponse>> {
    show_schedule(registry, person_id, schedule_id, Role::Interviewer).await
}

async fn show_schedule(
    registry: AppRegistry,
    person_id: PersonId,
    schedule_id: ScheduleId,
    role: Role,
) -> AppResult<Json<ScheduleResponse>> {
    ensure_person(&registry, person_id, role).await?;

    registry
        .schedule_repository()
        .find_by_id(schedule_id, person_id)
        .await
        .and_then(|schedule| match schedule {
            Some(schedule) => Ok(Json(schedule.into())),
            None => Err(AppError::EntityNotFound(format!(
                "schedule {schedule_id} is not found"
            ))),
        })
}

pub async fn update_candidate_schedule(
    Path((person_id, schedule_id)): Path<(PersonId, ScheduleId)>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateScheduleRequest>,
) -> AppResult<StatusCode> {
    update_schedule(registry, person_id, schedule_id, Role::Candidate, req).await
}

pub async fn update_interviewer_schedule(
    Path((person_id, schedule_id)): Path<(PersonId, ScheduleId)>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateScheduleRequest>,
) -> AppResult<StatusCode> {
    update_schedule(registry, person_id, schedule_id, Role::Interviewer, req).await
}

async fn update_schedule(
    registry: AppRegistry,
    person_id: PersonId,
    schedule_id: ScheduleId,
    role: Role,
    req: UpdateScheduleRequest,
) -> AppResult<StatusCode> {
    req.validate(&())?;
    ensure_person(&registry, person_id, role).await?;

    registry
        .schedule_repository()
        .update(req.into_event(schedule_id, person_id))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_candidate_schedule(
    Path((person_id, schedule_id)): Path<(PersonId, ScheduleId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    delete_schedule(registry, person_id, schedule_id, Role::Candidate).await
}

pub async fn delete_interviewer_schedule(
    Path((person_id, schedule_id)): Path<(PersonId, ScheduleId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    delete_schedule(registry, person_id, schedule_id, Role::Interviewer).await
}

async fn delete_schedule(
    registry: AppRegistry,
    person_id: PersonId,
    schedule_id: ScheduleId,
    role: Role,
) -> AppResult<StatusCode> {
    ensure_person(&registry, person_id, role).await?;

    registry
        .schedule_repository()
        .delete(DeleteSchedule::new(schedule_id, person_id))
        .await
        .map(|_| StatusCode::OK)
}

// パス上のロールと本人のロールが一致していることを確かめる
async fn ensure_person(registry: &AppRegistry, person_id: PersonId, role: Role) -> AppResult<()> {
    registry
        .person_repository()
        .find_by_id(person_id, role)
        .await
        .and_then(|person| match person {
            Some(_) => Ok(()),
            None => Err(AppError::EntityNotFound(format!(
                "{} {} is not found",
                role.as_ref(),
                person_id
            ))),
        })
}
