use axum::{
    Json,
    extract::{Path, State},
};

use crate::controllers::poll_controllers::{models::PollDetailsResponse, parse_poll_id};
use crate::services::poll_service;
use crate::utils::error::AppResult;
use crate::state::AppState;

pub async fn get_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<PollDetailsResponse>> {
    let poll_id = parse_poll_id(&poll_id)?;

    let (poll, options) = poll_service::get_poll_with_options(&state.store, poll_id).await?;

    tracing::debug!(poll_id, options = options.len(), "poll fetched");

    Ok(Json(PollDetailsResponse { poll, options }))
}
