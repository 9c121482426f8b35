mod engine;
mod runner;

pub use engine::{CountdownEngine, TickOutcome, TimerStatus, DEFAULT_DURATION_MIN};
pub use runner::{
    log_queue, spawn_session_logger, Countdown, SessionLog, LOG_QUEUE_CAPACITY,
    REWARD_NOTICE_DELAY,
};
