use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::controllers::poll_controllers::models::{CreatePollRequest, CreatePollResponse};
use crate::services::poll_service::{self, NewPoll};
use crate::utils::error::{AppError, AppResult};
use crate::state::AppState;

pub async fn create_poll(
    State(state): State<AppState>,
    payload: Result<Json<CreatePollRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreatePollResponse>)> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    // Validation happens before the store is touched.
    let new_poll = NewPoll::parse(payload.question.as_deref(), payload.options.as_deref())?;

    let (poll, options) = poll_service::create_poll(&state.store, new_poll).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePollResponse {
            message: "Poll created successfully".to_string(),
            poll,
            options,
        }),
    ))
}
