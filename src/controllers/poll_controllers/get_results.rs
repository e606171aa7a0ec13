use axum::{
    Json,
    extract::{Path, State},
};

use crate::controllers::poll_controllers::parse_poll_id;
use crate::services::results_service::{self, PollResults};
use crate::utils::error::AppResult;
use crate::state::AppState;

pub async fn get_results(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<PollResults>> {
    let poll_id = parse_poll_id(&poll_id)?;

    let results = results_service::compute_results(&state.store, poll_id).await?;

    Ok(Json(results))
}
