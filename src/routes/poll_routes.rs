use axum::{Router, routing::{get, post}};
use crate::controllers::poll_controllers::{
    cast_vote, create_poll, delete_poll, get_poll, get_results, polls,
};
use crate::state::AppState;


pub fn poll_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(polls::get_all_polls).post(create_poll::create_poll))
        .route("/:pollId", get(get_poll::get_poll).delete(delete_poll::delete_poll))
        .route("/:pollId/vote", post(cast_vote::cast_vote))
        .route("/:pollId/results", get(get_results::get_results))
        .with_state(state)
}
