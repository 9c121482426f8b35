//! # Studylog Core Library
//!
//! Core business logic for the Studylog study tracker: a countdown focus
//! timer that awards virtual currency on completion, and a record store
//! that mirrors the user's study sessions from a remote authenticated
//! record backend. GUI and CLI frontends are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Countdown engine**: a pure, tick-based state machine; the async
//!   [`Countdown`] driver owns the one-second tick task and all
//!   completion side effects (session auto-log, reward notice)
//! - **Record store**: in-memory cache of sessions and topic reference
//!   data, loaded from an injected [`SessionBackend`]
//! - **Notices**: user feedback goes through the fire-and-forget
//!   [`Notifier`] trait; the core never renders anything itself
//!
//! ## Key Components
//!
//! - [`CountdownEngine`] / [`Countdown`]: timer state machine and driver
//! - [`RecordStore`]: session cache, aggregation, and creation
//! - [`HttpBackend`]: REST client for the hosted record backend
//! - [`Config`]: application configuration management

pub mod config;
pub mod error;
pub mod notify;
pub mod reward;
pub mod store;
pub mod timer;

pub use config::{BackendConfig, Config};
pub use error::{BackendError, ConfigError, CoreError, Result};
pub use notify::{MemoryNotifier, Notice, NoticeLevel, Notifier, SilentNotifier, StderrNotifier};
pub use reward::reward_for_minutes;
pub use store::{HttpBackend, RecordStore, SessionBackend, SessionRecord, Topic, TopicTotal};
pub use timer::{Countdown, CountdownEngine, SessionLog, TickOutcome, TimerStatus};
