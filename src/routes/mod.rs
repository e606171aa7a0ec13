pub mod poll_routes;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::controllers::root_controller::root;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/polls", poll_routes::poll_routes(state))
        .layer(TraceLayer::new_for_http())
}
