mod backend;
mod records;
mod types;

pub use backend::{HttpBackend, SessionBackend};
pub use records::{RecordStore, TIMER_SESSION_NOTES, UNKNOWN_TOPIC_TITLE};
pub use types::{NewSession, SessionRecord, Topic, TopicTotal};
