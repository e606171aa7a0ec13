use serde::{Deserialize, Serialize};

use crate::models::{poll_models::{Poll, PollOption}, vote_record_models::VoteRecord};

/// The whole persisted dataset. Written back in full on every mutation.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Document {
    #[serde(default)]
    pub polls: Vec<Poll>,
    #[serde(default)]
    pub options: Vec<PollOption>,
    #[serde(default)]
    pub votes: Vec<VoteRecord>,
}

impl Document {
    pub fn find_poll(&self, poll_id: i64) -> Option<&Poll> {
        self.polls.iter().find(|poll| poll.id == poll_id)
    }

    /// Options owned by `poll_id`, in stored order.
    pub fn options_for(&self, poll_id: i64) -> Vec<PollOption> {
        self.options
            .iter()
            .filter(|option| option.poll_id == poll_id)
            .cloned()
            .collect()
    }

    pub fn votes_for(&self, option_id: i64) -> usize {
        self.votes.iter().filter(|vote| vote.option_id == option_id).count()
    }

    /// Largest id of any entity, used to seed the id generator after a restart.
    pub fn max_id(&self) -> i64 {
        let polls = self.polls.iter().map(|p| p.id);
        let options = self.options.iter().map(|o| o.id);
        let votes = self.votes.iter().map(|v| v.id);
        polls.chain(options).chain(votes).max().unwrap_or(0)
    }
}
