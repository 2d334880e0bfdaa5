use super::{
    health::build_health_check_routers, meeting::build_meeting_routers,
    person::{build_candidate_routers, build_interviewer_routers},
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_candidate_routers())
        .merge(build_interviewer_routers())
        .merge(build_meeting_routers());
    Router::new().nest("/api/v1", router)
}
