use crate::model::person::{
    CreatePersonRequest, PaginatedPersonResponse, PersonListQuery, PersonResponse,
    UpdatePersonRequest,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::PersonId, person::event::DeletePerson, role::Role};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_candidate(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreatePersonRequest>,
) -> AppResult<(StatusCode, Json<PersonId>)> {
    register_person(registry, Role::Candidate, req).await
}

pub async fn register_interviewer(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreatePersonRequest>,
) -> AppResult<(StatusCode, Json<PersonId>)> {
    register_person(registry, Role::Interviewer, req).await
}

async fn register_person(
    registry: AppRegistry,
    role: Role,
    req: CreatePersonRequest,
) -> AppResult<(StatusCode, Json<PersonId>)> {
    req.validate(&())?;

    registry
        .person_repository()
        .create(req.into_event(role))
        .await
        .map(|person_id| (StatusCode::CREATED, Json(person_id)))
}

pub async fn show_candidate_list(
    Query(query): Query<PersonListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedPersonResponse>> {
    show_person_list(registry, Role::Candidate, query).await
}

pub async fn show_interviewer_list(
    Query(query): Query<PersonListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedPersonResponse>> {
    show_person_list(registry, Role::Interviewer, query).await
}

async fn show_person_list(
    registry: AppRegistry,
    role: Role,
    query: PersonListQuery,
) -> AppResult<Json<PaginatedPersonResponse>> {
    query.validate(&())?;

    registry
        .person_repository()
        .find_all(query.into(), role)
        .await
        .map(PaginatedPersonResponse::from)
        .map(Json)
}

pub async fn show_candidate(
    Path(person_id): Path<PersonId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PersonResponse>> {
    show_person(registry, person_id, Role::Candidate).await
}

pub async fn show_interviewer(
    Path(person_id): Path<PersonId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PersonResponse>> {
    show_person(registry, person_id, Role::Interviewer).await
}

async fn show_person(
    registry: AppRegistry,
    person_id: PersonId,
    role: Role,
) -> AppResult<Json<PersonResponse>> {
    registry
        .person_repository()
        .find_by_id(person_id, role)
        .await
        .and_then(|person| match person {
            Some(person) => Ok(Json(person.into())),
            None => Err(AppError::EntityNotFound(format!(
                "{} {} is not found",
                role.as_ref(),
                person_id
            ))),
        })
}

pub async fn update_candidate(
    Path(person_id): Path<PersonId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdatePersonRequest>,
) -> AppResult<StatusCode> {
    update_person(registry, person_id, Role::Candidate, req).await
}

pub async fn update_interviewer(
    Path(person_id): Path<PersonId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdatePersonRequest>,
) -> AppResult<StatusCode> {
    update_person(registry, person_id, Role::Interviewer, req).await
}

async fn update_person(
    registry: AppRegistry,
    person_id: PersonId,
    role: Role,
    req: UpdatePersonRequest,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .person_repository()
        .update(req.into_event(person_id, role))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_candidate(
    Path(person_id): Path<PersonId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    delete_person(registry, person_id, Role::Candidate).await
}

pub async fn delete_interviewer(
    Path(person_id): Path<PersonId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    delete_person(registry, person_id, Role::Interviewer).await
}

async fn delete_person(
    registry: AppRegistry,
    person_id: PersonId,
    role: Role,
) -> AppResult<StatusCode> {
    registry
        .person_repository()
        .delete(DeletePerson::new(person_id, role))
        .await
        .map(|_| StatusCode::OK)
}
