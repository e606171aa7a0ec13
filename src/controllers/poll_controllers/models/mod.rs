use serde::{Deserialize, Serialize};
use crate::models::poll_models::{Poll, PollOption};
use crate::utils::error::{AppError, AppResult};

#[derive(Deserialize, Debug)]
pub struct CreatePollRequest {
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
}

#[derive(Serialize, Debug)]
pub struct CreatePollResponse {
    pub message: String,
    pub poll: Poll,
    pub options: Vec<PollOption>,
}

#[derive(Serialize, Debug)]
pub struct PollDetailsResponse {
    pub poll: Poll,
    pub options: Vec<PollOption>,
}

#[derive(Deserialize, Debug)]
pub struct CastVoteRequest {
    #[serde(rename = "optionId")]
    pub option_id: Option<OptionIdInput>,
}

/// Browsers post form values as strings, so `"17"` and `17` are both accepted.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum OptionIdInput {
    Number(i64),
    Text(String),
}

impl CastVoteRequest {
    /// Missing or blank ids and non-numeric strings are client errors.
    pub fn resolve_option_id(&self) -> AppResult<i64> {
        let raw = match &self.option_id {
            Some(OptionIdInput::Number(id)) => return Ok(*id),
            Some(OptionIdInput::Text(raw)) if !raw.trim().is_empty() => raw.trim(),
            _ => return Err(AppError::BadRequest("Option ID is required".to_string())),
        };

        raw.parse::<i64>()
            .map_err(|_| AppError::BadRequest("Option ID must be a number".to_string()))
    }
}


#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }
}
