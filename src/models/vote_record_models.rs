use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// One ballot. Append-only; removed only when its poll is deleted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub id: i64,

    pub poll_id: i64,

    pub option_id: i64,

    pub voted_at: DateTime<Utc>,
}
