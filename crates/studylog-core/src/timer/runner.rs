//! Async countdown driver.
//!
//! [`Countdown`] wraps the pure [`CountdownEngine`] and owns everything
//! time-related: the one-second tick task, completion side effects, and
//! the notices for pause/stop. The engine stays caller-ticked and
//! clock-free, which keeps the state machine testable on its own.
//!
//! Completion side effects are fire-and-forget: the tick task pushes a
//! [`SessionLog`] request into a bounded queue and emits the reward notice
//! from a detached task. A slow or failing record write can never delay
//! the transition to Completed.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use uuid::Uuid;

use super::engine::{CountdownEngine, TickOutcome, TimerStatus};
use crate::notify::{Notice, Notifier};
use crate::store::{RecordStore, SessionBackend};

/// Capacity of the session-log queue. Overflow is diagnostic-only.
pub const LOG_QUEUE_CAPACITY: usize = 16;

/// Pause between completion and the reward notice. Presentation
/// affordance, not a correctness requirement.
pub const REWARD_NOTICE_DELAY: Duration = Duration::from_millis(600);

/// A request to record one completed focus session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLog {
    pub duration_min: u32,
    pub topic_id: Option<Uuid>,
}

/// Create the bounded session-log queue a [`Countdown`] feeds.
pub fn log_queue() -> (mpsc::Sender<SessionLog>, mpsc::Receiver<SessionLog>) {
    mpsc::channel(LOG_QUEUE_CAPACITY)
}

/// Drain the session-log queue into the record store.
///
/// Runs until every sender is dropped. Failures are reported to stderr
/// only; the store already notifies the user on its own write failures.
pub fn spawn_session_logger<B>(
    store: Arc<Mutex<RecordStore<B>>>,
    mut rx: mpsc::Receiver<SessionLog>,
) -> JoinHandle<()>
where
    B: SessionBackend + Send + Sync + 'static,
{
    tokio::spawn(async move {
        while let Some(req) = rx.recv().await {
            let logged = store
                .lock()
                .await
                .log_timer_session(req.duration_min, req.topic_id)
                .await;
            if logged.is_none() {
                eprintln!(
                    "Warning: failed to record timer session ({} min)",
                    req.duration_min
                );
            }
        }
    })
}

/// Countdown timer with an owned tick source.
///
/// At most one tick task is ever live per instance: arming a new one
/// always aborts the previous one first.
pub struct Countdown {
    engine: Arc<Mutex<CountdownEngine>>,
    notifier: Arc<dyn Notifier>,
    log_tx: mpsc::Sender<SessionLog>,
    topic_id: Option<Uuid>,
    tick_task: Option<JoinHandle<()>>,
    /// Pending delayed reward notice, filled in by the tick task on
    /// completion so stop()/drop can cancel it.
    notice_task: Arc<StdMutex<Option<JoinHandle<()>>>>,
}

impl Countdown {
    pub fn new(
        duration_min: u32,
        notifier: Arc<dyn Notifier>,
        log_tx: mpsc::Sender<SessionLog>,
    ) -> Self {
        Self {
            engine: Arc::new(Mutex::new(CountdownEngine::new(duration_min))),
            notifier,
            log_tx,
            topic_id: None,
            tick_task: None,
            notice_task: Arc::new(StdMutex::new(None)),
        }
    }

    /// Shared handle to the engine, for status polling by the embedder.
    pub fn engine(&self) -> Arc<Mutex<CountdownEngine>> {
        Arc::clone(&self.engine)
    }

    /// Topic the auto-logged session will be associated with.
    pub fn set_topic(&mut self, topic_id: Option<Uuid>) {
        self.topic_id = topic_id;
    }

    pub async fn status(&self) -> TimerStatus {
        self.engine.lock().await.status()
    }

    pub async fn remaining_secs(&self) -> u32 {
        self.engine.lock().await.remaining_secs()
    }

    pub async fn earned_reward(&self) -> u32 {
        self.engine.lock().await.earned_reward()
    }

    /// Set a new duration. Honored only while Idle (engine guard).
    pub async fn configure(&self, duration_min: u32) {
        self.engine.lock().await.configure(duration_min);
    }

    /// Start (or restart) the countdown and arm the tick source.
    ///
    /// Valid from Idle and Paused. Calling start on an already running
    /// countdown re-arms the tick source; the previous tick task is
    /// aborted before the new one is spawned either way, so two live tick
    /// sources cannot exist.
    pub async fn start(&mut self) {
        {
            let mut engine = self.engine.lock().await;
            match engine.status() {
                TimerStatus::Idle | TimerStatus::Paused => {
                    engine.start();
                }
                TimerStatus::Running => {}
                TimerStatus::Completed => return,
            }
        }
        self.abort_tick_task();
        self.tick_task = Some(self.spawn_tick_task());
    }

    /// Pause a running countdown and cancel the tick source.
    pub async fn pause(&mut self) {
        let paused = self.engine.lock().await.pause();
        if !paused {
            return;
        }
        self.abort_tick_task();
        let remaining = self.remaining_secs().await;
        self.notifier.notify(Notice::info(
            "Timer paused",
            format!("{} remaining", format_mm_ss(remaining)),
        ));
    }

    /// Resume a paused countdown. Delegates to [`Countdown::start`].
    pub async fn resume(&mut self) {
        if self.engine.lock().await.status() != TimerStatus::Paused {
            return;
        }
        self.start().await;
    }

    /// Cancel the tick source and return to Idle at full duration.
    pub async fn stop(&mut self) {
        self.abort_tick_task();
        self.abort_notice_task();
        self.engine.lock().await.stop();
        self.notifier
            .notify(Notice::info("Timer stopped", "Countdown reset"));
    }

    /// Alias of [`Countdown::stop`].
    pub async fn reset(&mut self) {
        self.stop().await;
    }

    fn abort_tick_task(&mut self) {
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
    }

    fn abort_notice_task(&self) {
        let mut slot = self
            .notice_task
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if let Some(task) = slot.take() {
            task.abort();
        }
    }

    fn spawn_tick_task(&self) -> JoinHandle<()> {
        let engine = Arc::clone(&self.engine);
        let notifier = Arc::clone(&self.notifier);
        let log_tx = self.log_tx.clone();
        let topic_id = self.topic_id;
        let notice_slot = Arc::clone(&self.notice_task);
        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick resolves immediately; skip it so the
            // first decrement lands a full second after start.
            interval.tick().await;
            loop {
                interval.tick().await;
                let outcome = engine.lock().await.tick();
                match outcome {
                    Some(TickOutcome::Running { .. }) => {}
                    Some(TickOutcome::Completed {
                        duration_min,
                        reward,
                    }) => {
                        // Fire-and-forget: the tick never waits on the
                        // store or the notice.
                        if let Err(e) = log_tx.try_send(SessionLog {
                            duration_min,
                            topic_id,
                        }) {
                            eprintln!("Warning: failed to queue session log: {e}");
                        }
                        let notice = tokio::spawn(async move {
                            time::sleep(REWARD_NOTICE_DELAY).await;
                            notifier.notify(Notice::success(
                                "Focus session complete",
                                format!("You earned {reward} coins"),
                            ));
                        });
                        *notice_slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(notice);
                        break;
                    }
                    None => break,
                }
            }
        })
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        // No tick or pending notice may outlive its countdown.
        self.abort_tick_task();
        self.abort_notice_task();
    }
}

fn format_mm_ss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;

    /// Advance the paused clock one second at a time so every interval
    /// tick fires exactly once. The leading yield lets a freshly armed
    /// tick task register its interval before the clock moves.
    async fn step_secs(n: u32) {
        tokio::task::yield_now().await;
        for _ in 0..n {
            time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
    }

    fn countdown(minutes: u32) -> (Countdown, mpsc::Receiver<SessionLog>, Arc<MemoryNotifier>) {
        let notifier = MemoryNotifier::new();
        let (tx, rx) = log_queue();
        let cd = Countdown::new(minutes, notifier.clone(), tx);
        (cd, rx, notifier)
    }

    #[tokio::test(start_paused = true)]
    async fn full_countdown_logs_exactly_once() {
        let (mut cd, mut rx, _notifier) = countdown(1);
        cd.start().await;

        step_secs(60).await;
        assert_eq!(cd.status().await, TimerStatus::Completed);
        assert_eq!(cd.remaining_secs().await, 0);
        assert_eq!(cd.earned_reward().await, 1);

        assert_eq!(
            rx.try_recv().ok(),
            Some(SessionLog {
                duration_min: 1,
                topic_id: None,
            })
        );
        assert!(rx.try_recv().is_err(), "only one session log expected");
    }

    #[tokio::test(start_paused = true)]
    async fn reward_notice_arrives_after_delay() {
        let (mut cd, _rx, notifier) = countdown(1);
        cd.start().await;
        step_secs(60).await;

        assert!(notifier.snapshot().is_empty(), "notice must be delayed");
        // Let the detached notice task arm its delay before advancing.
        tokio::task::yield_now().await;
        time::advance(REWARD_NOTICE_DELAY).await;
        tokio::task::yield_now().await;

        let notices = notifier.take();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Focus session complete");
        assert!(notices[0].body.contains("1 coin"));
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_keeps_a_single_tick_source() {
        let (mut cd, _rx, _notifier) = countdown(25);
        cd.start().await;
        cd.start().await;

        step_secs(10).await;
        // Two live tick sources would have decremented twice per second.
        assert_eq!(cd.remaining_secs().await, 25 * 60 - 10);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_cancels_ticking_and_resume_continues() {
        let (mut cd, _rx, notifier) = countdown(25);
        cd.start().await;
        step_secs(5).await;

        cd.pause().await;
        assert_eq!(cd.status().await, TimerStatus::Paused);
        step_secs(30).await;
        assert_eq!(cd.remaining_secs().await, 25 * 60 - 5);

        let notices = notifier.take();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Timer paused");

        cd.resume().await;
        assert_eq!(cd.status().await, TimerStatus::Running);
        step_secs(5).await;
        assert_eq!(cd.remaining_secs().await, 25 * 60 - 10);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_resets_to_full_duration() {
        let (mut cd, mut rx, _notifier) = countdown(25);
        cd.start().await;
        step_secs(30).await;

        cd.stop().await;
        assert_eq!(cd.status().await, TimerStatus::Idle);
        assert_eq!(cd.remaining_secs().await, 25 * 60);

        // Stopped countdown must not keep ticking or log anything.
        step_secs(30).await;
        assert_eq!(cd.remaining_secs().await, 25 * 60);
        assert!(rx.try_recv().is_err());

        // Idempotent.
        cd.stop().await;
        assert_eq!(cd.status().await, TimerStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_right_after_completion_suppresses_reward_notice() {
        let (mut cd, _rx, notifier) = countdown(1);
        cd.start().await;
        step_secs(60).await;
        assert_eq!(cd.status().await, TimerStatus::Completed);

        // Stop lands inside the notice delay window; the pending reward
        // notice must be cancelled with the rest of the countdown.
        cd.stop().await;
        notifier.take();

        tokio::task::yield_now().await;
        time::advance(REWARD_NOTICE_DELAY).await;
        tokio::task::yield_now().await;
        assert!(notifier.take().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn completed_session_carries_topic() {
        let topic = Uuid::new_v4();
        let (mut cd, mut rx, _notifier) = countdown(1);
        cd.set_topic(Some(topic));
        cd.start().await;
        step_secs(60).await;

        assert_eq!(
            rx.try_recv().ok(),
            Some(SessionLog {
                duration_min: 1,
                topic_id: Some(topic),
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn configure_ignored_while_running() {
        let (mut cd, _rx, _notifier) = countdown(25);
        cd.configure(50).await;
        assert_eq!(cd.remaining_secs().await, 50 * 60);

        cd.start().await;
        cd.configure(10).await;
        step_secs(1).await;
        assert_eq!(cd.remaining_secs().await, 50 * 60 - 1);
    }
}
