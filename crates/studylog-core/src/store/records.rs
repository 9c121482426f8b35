//! In-memory record store mirrored from the remote backend.
//!
//! The store owns a cache of the owner's sessions plus the topic
//! reference set, both loaded once per [`RecordStore::initialize`]. All
//! failures are terminal at the operation that issued them: the user gets
//! a transient notice, callers get an empty result, and nothing is ever
//! re-raised.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::backend::SessionBackend;
use super::types::{NewSession, SessionRecord, Topic, TopicTotal};
use crate::error::{CoreError, Result};
use crate::notify::{Notice, Notifier};
use crate::reward::reward_for_minutes;

/// Notes text stamped on sessions auto-logged by the countdown timer.
pub const TIMER_SESSION_NOTES: &str = "Logged from focus timer";

/// Title used when a session references a topic the cache cannot resolve.
pub const UNKNOWN_TOPIC_TITLE: &str = "Unknown topic";

/// Session cache plus topic reference data for one authenticated owner.
///
/// Cache order is newest-created-first: `create_session` prepends,
/// independent of the `date` field.
pub struct RecordStore<B> {
    backend: B,
    notifier: Arc<dyn Notifier>,
    owner_id: Option<Uuid>,
    topics: Vec<Topic>,
    sessions: Vec<SessionRecord>,
    loading: bool,
}

impl<B: SessionBackend> RecordStore<B> {
    pub fn new(backend: B, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            owner_id: None,
            topics: Vec::new(),
            sessions: Vec::new(),
            loading: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn owner_id(&self) -> Option<Uuid> {
        self.owner_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn sessions(&self) -> &[SessionRecord] {
        &self.sessions
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Total minutes across all cached sessions. 0 when empty.
    pub fn total_study_time(&self) -> u64 {
        self.sessions.iter().map(|s| u64::from(s.duration_min)).sum()
    }

    /// Cached sessions grouped by topic, summed and sorted by total
    /// minutes descending. Sessions without a topic are excluded; ties
    /// keep first-seen order; unresolved topic ids get a placeholder
    /// title.
    pub fn most_studied_topics(&self) -> Vec<TopicTotal> {
        let mut totals: Vec<(Uuid, u64)> = Vec::new();
        for session in &self.sessions {
            let Some(topic_id) = session.topic_id else {
                continue;
            };
            match totals.iter_mut().find(|(id, _)| *id == topic_id) {
                Some((_, total)) => *total += u64::from(session.duration_min),
                None => totals.push((topic_id, u64::from(session.duration_min))),
            }
        }
        // Stable sort keeps first-seen order among equal totals.
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals
            .into_iter()
            .map(|(topic_id, total_min)| TopicTotal {
                topic_id,
                title: self
                    .topics
                    .iter()
                    .find(|t| t.id == topic_id)
                    .map(|t| t.title.clone())
                    .unwrap_or_else(|| UNKNOWN_TOPIC_TITLE.to_string()),
                total_min,
            })
            .collect()
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Load identity, topics, and the owner's sessions from the backend.
    ///
    /// Caches are replaced only on full success; any failure notifies the
    /// user and leaves them in their prior state. The loading flag clears
    /// on every path. Returns whether the load succeeded.
    pub async fn initialize(&mut self) -> bool {
        self.loading = true;
        let result = self.refresh().await;
        if let Err(ref e) = result {
            self.notifier
                .notify(Notice::error("Failed to load study data", e.to_string()));
        }
        self.loading = false;
        result.is_ok()
    }

    async fn refresh(&mut self) -> Result<()> {
        let owner_id = self
            .backend
            .current_identity()
            .await?
            .ok_or(CoreError::Unauthenticated)?;
        let topics = self.backend.list_topics().await?;
        let sessions = self.backend.list_sessions(owner_id).await?;
        self.owner_id = Some(owner_id);
        self.topics = topics;
        self.sessions = sessions;
        Ok(())
    }

    /// Persist a new session and prepend it to the cache.
    ///
    /// Requires an authenticated owner. Returns the stored record, or
    /// `None` after notifying on any failure. Never panics or propagates
    /// past this boundary.
    pub async fn create_session(
        &mut self,
        topic_id: Option<Uuid>,
        duration_min: u32,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Option<SessionRecord> {
        match self.try_create(topic_id, duration_min, date, notes).await {
            Ok(record) => {
                self.sessions.insert(0, record.clone());
                self.notifier.notify(Notice::success(
                    "Session logged",
                    format!(
                        "{duration_min} min recorded (+{} coins)",
                        record.reward_earned
                    ),
                ));
                Some(record)
            }
            Err(e) => {
                self.notifier
                    .notify(Notice::error("Failed to log session", e.to_string()));
                None
            }
        }
    }

    async fn try_create(
        &self,
        topic_id: Option<Uuid>,
        duration_min: u32,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Result<SessionRecord> {
        let owner_id = self.owner_id.ok_or(CoreError::Unauthenticated)?;
        let new = NewSession {
            owner_id,
            topic_id,
            duration_min,
            date,
            notes,
            reward_earned: reward_for_minutes(duration_min),
        };
        Ok(self.backend.insert_session(new).await?)
    }

    /// Record a session completed by the countdown timer: today's date,
    /// fixed notes text, then [`RecordStore::create_session`].
    pub async fn log_timer_session(
        &mut self,
        duration_min: u32,
        topic_id: Option<Uuid>,
    ) -> Option<SessionRecord> {
        let today = Utc::now().date_naive();
        self.create_session(
            topic_id,
            duration_min,
            today,
            Some(TIMER_SESSION_NOTES.to_string()),
        )
        .await
    }

    /// Not implemented: remote mutation and cache reconciliation for
    /// edits are an open contract question (see DESIGN.md). No-op.
    pub async fn update_session(&mut self, id: Uuid) -> Option<SessionRecord> {
        eprintln!("Warning: update_session({id}) is not implemented");
        None
    }

    /// Not implemented: see [`RecordStore::update_session`]. No-op.
    pub async fn delete_session(&mut self, id: Uuid) -> bool {
        eprintln!("Warning: delete_session({id}) is not implemented");
        false
    }
}
