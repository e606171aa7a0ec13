use axum::{
    Json,
    extract::{Path, State},
};

use crate::controllers::poll_controllers::{models::MessageResponse, parse_poll_id};
use crate::services::poll_service;
use crate::utils::error::AppResult;
use crate::state::AppState;

pub async fn delete_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    let poll_id = parse_poll_id(&poll_id)?;

    poll_service::delete_poll(&state.store, poll_id).await?;

    Ok(Json(MessageResponse::new("Poll deleted successfully")))
}
