use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::controllers::poll_controllers::{
    models::{CastVoteRequest, MessageResponse},
    parse_poll_id,
};
use crate::services::vote_service;
use crate::utils::error::{AppError, AppResult};
use crate::state::AppState;

pub async fn cast_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<CastVoteRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let option_id = payload.resolve_option_id()?;

    let poll_id = parse_poll_id(&poll_id)?;

    vote_service::cast_vote(&state.store, poll_id, option_id).await?;

    Ok(Json(MessageResponse::new("Vote recorded successfully")))
}
