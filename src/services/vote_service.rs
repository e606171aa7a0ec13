use chrono::Utc;

use crate::db::json_store::JsonStore;
use crate::models::vote_record_models::VoteRecord;
use crate::utils::error::{Entity, PollError, PollResult};

/// Records one vote: bumps the option's counter and appends the vote record
/// in the same transaction.
pub async fn cast_vote(store: &JsonStore, poll_id: i64, option_id: i64) -> PollResult<VoteRecord> {
    let vote = store
        .transaction(|doc, ids| {
            if doc.find_poll(poll_id).is_none() {
                return Err(PollError::NotFound(Entity::Poll));
            }

            // An option id that belongs to a different poll is rejected too.
            let option = doc
                .options
                .iter_mut()
                .find(|opt| opt.id == option_id && opt.poll_id == poll_id)
                .ok_or(PollError::NotFound(Entity::Option))?;

            option.votes += 1;

            let vote = VoteRecord {
                id: ids.next(),
                poll_id,
                option_id,
                voted_at: Utc::now(),
            };
            doc.votes.push(vote.clone());

            Ok(vote)
        })
        .await?;

    tracing::info!(poll_id, option_id, vote_id = vote.id, "vote recorded");
    Ok(vote)
}
