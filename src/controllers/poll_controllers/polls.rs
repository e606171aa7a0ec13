use axum::{
    Json,
    extract::State,
};

use crate::models::poll_models::Poll;
use crate::services::poll_service;
use crate::utils::error::AppResult;
use crate::state::AppState;

pub async fn get_all_polls(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Poll>>> {
    let polls = poll_service::list_polls(&state.store).await?;

    Ok(Json(polls))
}
