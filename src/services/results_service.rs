use serde::Serialize;

use crate::db::json_store::JsonStore;
use crate::models::poll_models::{Poll, PollOption};
use crate::utils::error::{Entity, PollError, PollResult};

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionResult {
    #[serde(flatten)]
    pub option: PollOption,
    pub percentage: u8,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollResults {
    pub poll: Poll,
    /// Highest vote count first; equal counts keep their stored order.
    pub options: Vec<OptionResult>,
    pub total_votes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_option_id: Option<i64>,
}

pub async fn compute_results(store: &JsonStore, poll_id: i64) -> PollResult<PollResults> {
    store
        .read(|doc| {
            let poll = doc.find_poll(poll_id).cloned().ok_or(PollError::NotFound(Entity::Poll))?;
            Ok(tally(poll, doc.options_for(poll_id)))
        })
        .await
}

/// Percentages and the leading option for `options`, given in stored order.
pub fn tally(poll: Poll, options: Vec<PollOption>) -> PollResults {
    let total_votes = options.iter().fold(0u64, |sum, o| sum.saturating_add(o.votes));

    // First maximum in stored order wins a tie.
    let leading_option_id = options
        .iter()
        .fold(None::<&PollOption>, |best, opt| match best {
            Some(b) if b.votes >= opt.votes => Some(b),
            _ => Some(opt),
        })
        .map(|o| o.id);

    let mut results: Vec<OptionResult> = options
        .into_iter()
        .map(|option| OptionResult {
            percentage: percentage(option.votes, total_votes),
            option,
        })
        .collect();

    results.sort_by(|a, b| b.option.votes.cmp(&a.option.votes));

    PollResults {
        poll,
        options: results,
        total_votes,
        leading_option_id,
    }
}

/// `votes / total * 100`, rounded half up. Widened so no stored count can
/// overflow.
fn percentage(votes: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let (votes, total) = (u128::from(votes), u128::from(total));
    ((votes * 200 + total) / (total * 2)) as u8
}
