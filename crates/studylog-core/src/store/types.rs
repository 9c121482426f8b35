//! Record types exchanged with the remote backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One persisted study session, as stored by the backend.
///
/// Records are never mutated in place by this crate; update/delete remain
/// an open contract gap (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[serde(default)]
    pub topic_id: Option<Uuid>,
    pub duration_min: u32,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    pub reward_earned: u32,
}

/// Insert payload for a new session. The backend assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewSession {
    pub owner_id: Uuid,
    pub topic_id: Option<Uuid>,
    pub duration_min: u32,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub reward_earned: u32,
}

/// Reference data a session may be associated with. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: Uuid,
    pub code: String,
    pub title: String,
}

/// Aggregated minutes for one topic, from [`most_studied_topics`].
///
/// [`most_studied_topics`]: super::RecordStore::most_studied_topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicTotal {
    pub topic_id: Uuid,
    pub title: String,
    pub total_min: u64,
}
