//! Countdown engine implementation.
//!
//! The engine is a pure, tick-based state machine. It does not own a clock
//! or any threads - the caller (normally [`super::runner::Countdown`]) is
//! responsible for calling `tick()` once per second while running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Completed) -> Idle
//! ```
//!
//! `configure()` is only honored while Idle; there is no way out of
//! Completed except `stop()`/`reset()`.

use serde::{Deserialize, Serialize};

use crate::reward::reward_for_minutes;

pub const DEFAULT_DURATION_MIN: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Result of one `tick()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting down.
    Running { remaining_secs: u32 },
    /// The countdown just reached zero on this tick.
    Completed { duration_min: u32, reward: u32 },
}

/// Core countdown engine.
///
/// Invariant: `remaining_secs <= duration_secs` at all times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    duration_secs: u32,
    remaining_secs: u32,
    status: TimerStatus,
    /// Coins earned across all completions of this engine instance.
    earned_reward: u32,
}

impl CountdownEngine {
    /// Create a new engine with the given focus duration.
    ///
    /// Starts in the `Idle` state with remaining time at full duration.
    pub fn new(duration_min: u32) -> Self {
        let duration_secs = duration_min.max(1).saturating_mul(60);
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            status: TimerStatus::Idle,
            earned_reward: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn duration_min(&self) -> u32 {
        self.duration_secs / 60
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn earned_reward(&self) -> u32 {
        self.earned_reward
    }

    /// 0.0 .. 1.0 progress through the countdown.
    pub fn progress(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.duration_secs as f64)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set a new duration, mirroring it into remaining time.
    ///
    /// Honored only while Idle; silently ignored in any other state.
    /// The guard keeps a running or paused countdown from being resized
    /// underneath its tick source.
    pub fn configure(&mut self, duration_min: u32) {
        if self.status != TimerStatus::Idle {
            return;
        }
        self.duration_secs = duration_min.max(1).saturating_mul(60);
        self.remaining_secs = self.duration_secs;
    }

    /// Transition to Running. Valid from Idle and Paused.
    ///
    /// Returns `true` when the transition happened, so the driver knows to
    /// (re)arm its tick source.
    pub fn start(&mut self) -> bool {
        match self.status {
            TimerStatus::Idle | TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                true
            }
            TimerStatus::Running | TimerStatus::Completed => false,
        }
    }

    /// Transition to Paused. Valid from Running only.
    pub fn pause(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.status = TimerStatus::Paused;
        true
    }

    /// Resume a paused countdown. Delegates to `start()`.
    pub fn resume(&mut self) -> bool {
        if self.status != TimerStatus::Paused {
            return false;
        }
        self.start()
    }

    /// Return to Idle from any state, resetting remaining time to full
    /// duration. Idempotent.
    pub fn stop(&mut self) {
        self.status = TimerStatus::Idle;
        self.remaining_secs = self.duration_secs;
    }

    /// Alias of `stop()`.
    pub fn reset(&mut self) {
        self.stop();
    }

    /// One one-second countdown step. Returns `None` unless Running.
    ///
    /// When remaining time reaches zero the engine transitions to
    /// Completed, clamps remaining to zero, and accumulates the reward;
    /// the outcome carries everything the driver needs to fire the
    /// completion side effects.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.status != TimerStatus::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return Some(TickOutcome::Running {
                remaining_secs: self.remaining_secs,
            });
        }
        self.status = TimerStatus::Completed;
        let duration_min = self.duration_min();
        let reward = reward_for_minutes(duration_min);
        self.earned_reward += reward;
        Some(TickOutcome::Completed {
            duration_min,
            reward,
        })
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MIN)
    }
}
