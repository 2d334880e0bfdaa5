use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::meeting::{book_meeting, cancel_meeting, query_meetings, show_meeting};

pub fn build_meeting_routers() -> Router<AppRegistry> {
    let meeting_routers = Router::new()
        .route("/", get(query_meetings))
        .route("/book/:schedule_id", post(book_meeting))
        .route("/:booking_id", get(show_meeting))
        .route("/:booking_id", delete(cancel_meeting));

    Router::new().nest("/meetings", meeting_routers)
}
