use chrono::Utc;

use crate::db::json_store::JsonStore;
use crate::models::poll_models::{Poll, PollOption};
use crate::utils::error::{Entity, PollError, PollResult};

/// Trimmed, validated input for a new poll.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPoll {
    pub question: String,
    pub options: Vec<String>,
}

impl NewPoll {
    pub fn parse(question: Option<&str>, options: Option<&[String]>) -> PollResult<Self> {
        let question = question.map(str::trim).unwrap_or_default();
        if question.is_empty() {
            return Err(PollError::InvalidInput("Poll question is required".to_string()));
        }

        let options: Vec<String> = options
            .unwrap_or_default()
            .iter()
            .map(|opt| opt.trim().to_string())
            .collect();

        if options.len() < 2 {
            return Err(PollError::InvalidInput("Enter at least 2 options".to_string()));
        }
        if options.iter().any(String::is_empty) {
            return Err(PollError::InvalidInput("Poll options cannot be empty".to_string()));
        }

        Ok(Self { question: question.to_string(), options })
    }
}

pub async fn create_poll(
    store: &JsonStore,
    new_poll: NewPoll,
) -> PollResult<(Poll, Vec<PollOption>)> {
    let (poll, options) = store
        .transaction(move |doc, ids| {
            let poll_id = ids.reserve(new_poll.options.len());

            let poll = Poll {
                id: poll_id,
                question: new_poll.question,
                is_active: true,
                created_at: Utc::now(),
            };

            let options: Vec<PollOption> = new_poll
                .options
                .into_iter()
                .zip(1..)
                .map(|(text, offset)| PollOption {
                    id: poll_id + offset,
                    poll_id,
                    text,
                    votes: 0,
                })
                .collect();

            doc.polls.push(poll.clone());
            doc.options.extend(options.iter().cloned());

            Ok((poll, options))
        })
        .await?;

    tracing::info!(poll_id = poll.id, options = options.len(), "poll created");
    Ok((poll, options))
}

pub async fn list_polls(store: &JsonStore) -> PollResult<Vec<Poll>> {
    store.read(|doc| Ok(doc.polls.clone())).await
}

pub async fn get_poll_with_options(
    store: &JsonStore,
    poll_id: i64,
) -> PollResult<(Poll, Vec<PollOption>)> {
    store
        .read(|doc| {
            let poll = doc.find_poll(poll_id).cloned().ok_or(PollError::NotFound(Entity::Poll))?;
            Ok((poll, doc.options_for(poll_id)))
        })
        .await
}

/// Removes the poll together with every option and vote that references it.
pub async fn delete_poll(store: &JsonStore, poll_id: i64) -> PollResult<()> {
    let (options, votes) = store
        .transaction(|doc, _| {
            if doc.find_poll(poll_id).is_none() {
                return Err(PollError::NotFound(Entity::Poll));
            }

            let options_before = doc.options.len();
            let votes_before = doc.votes.len();

            doc.polls.retain(|p| p.id != poll_id);
            doc.options.retain(|o| o.poll_id != poll_id);
            doc.votes.retain(|v| v.poll_id != poll_id);

            Ok((options_before - doc.options.len(), votes_before - doc.votes.len()))
        })
        .await?;

    tracing::info!(poll_id, options, votes, "poll deleted");
    Ok(())
}
