use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::meeting::{show_candidate_meetings, show_interviewer_meetings};
use crate::handler::person::{
    delete_candidate, delete_interviewer, register_candidate, register_interviewer,
    show_candidate, show_candidate_list, show_interviewer, show_interviewer_list,
    update_candidate, update_interviewer,
};
use crate::handler::schedule::{
    delete_candidate_schedule, delete_interviewer_schedule, register_candidate_schedule,
    register_interviewer_schedule, show_candidate_schedule, show_candidate_schedules,
    show_interviewer_schedule, show_interviewer_schedules, update_candidate_schedule,
    update_interviewer_schedule,
};

pub fn build_candidate_routers() -> Router<AppRegistry> {
    let candidate_routers = Router::new()
        .route("/", post(register_candidate))
        .route("/", get(show_candidate_list))
        .route("/:person_id", get(show_candidate))
        .route("/:person_id", put(update_candidate))
        .route("/:person_id", delete(delete_candidate))
        .route("/:person_id/schedules", post(register_candidate_schedule))
        .route("/:person_id/schedules", get(show_candidate_schedules))
        .route(
            "/:person_id/schedules/:schedule_id",
            get(show_candidate_schedule),
        )
        .route(
            "/:person_id/schedules/:schedule_id",
            put(update_candidate_schedule),
        )
        .route(
            "/:person_id/schedules/:schedule_id",
            delete(delete_candidate_schedule),
        )
        .route("/:person_id/meetings", get(show_candidate_meetings));

    Router::new().nest("/candidates", candidate_routers)
}

pub fn build_interviewer_routers() -> Router<AppRegistry> {
    let interviewer_routers = Router::new()
        .route("/", post(register_interviewer))
        .route("/", get(show_interviewer_list))
        .route("/:person_id", get(show_interviewer))
        .route("/:person_id", put(update_interviewer))
        .route("/:person_id", delete(delete_interviewer))
        .route("/:person_id/schedules", post(register_interviewer_schedule))
        .route("/:person_id/schedules", get(show_interviewer_schedules))
        .route(
            "/:person_id/schedules/:schedule_id",
            get(show_interviewer_schedule),
        )
        .route(
            "/:person_id/schedules/:schedule_id",
            put(update_interviewer_schedule),
        )
        .route(
            "/:person_id/schedules/:schedule_id",
            delete(delete_interviewer_schedule),
        )
        .route("/:person_id/meetings", get(show_interviewer_meetings));

    Router::new().nest("/interviewers", interviewer_routers)
}
