pub mod cast_vote;
pub mod create_poll;
pub mod delete_poll;
pub mod get_poll;
pub mod get_results;
pub mod models;
pub mod polls;

use crate::utils::error::{AppError, AppResult};

/// Ids are integers; anything else cannot name an existing poll.
pub(crate) fn parse_poll_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::NotFound("Poll not found".to_string()))
}
