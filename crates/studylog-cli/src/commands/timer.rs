use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::Subcommand;
use tokio::sync::Mutex;
use uuid::Uuid;

use studylog_core::timer::{log_queue, spawn_session_logger, Countdown, REWARD_NOTICE_DELAY};
use studylog_core::{Config, TimerStatus};

use super::CliError;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a focus countdown in the foreground, logging it on completion
    Run {
        /// Duration in minutes (defaults to timer.default_minutes)
        #[arg(short, long)]
        minutes: Option<u32>,
        /// Topic to associate the logged session with
        #[arg(short, long)]
        topic: Option<Uuid>,
    },
}

pub async fn run(action: TimerAction) -> Result<(), CliError> {
    match action {
        TimerAction::Run { minutes, topic } => run_countdown(minutes, topic).await,
    }
}

async fn run_countdown(minutes: Option<u32>, topic: Option<Uuid>) -> Result<(), CliError> {
    let config = Config::load()?;
    let minutes = minutes.unwrap_or(config.timer.default_minutes);

    let store = Arc::new(Mutex::new(super::open_store().await?));
    let (tx, rx) = log_queue();
    let logger = spawn_session_logger(Arc::clone(&store), rx);

    let mut countdown = Countdown::new(minutes, super::notifier_for(&config), tx);
    countdown.set_topic(topic);
    countdown.start().await;
    println!("Focus session started: {minutes} min");

    let engine = countdown.engine();
    loop {
        let (status, remaining) = {
            let engine = engine.lock().await;
            (engine.status(), engine.remaining_secs())
        };
        if status == TimerStatus::Completed {
            break;
        }
        print!("\r{:02}:{:02} remaining ", remaining / 60, remaining % 60);
        std::io::stdout().flush()?;
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    let reward = countdown.earned_reward().await;
    println!("\rDone. You earned {reward} coins.     ");

    // Let the auto-log drain and the reward notice fire before exiting.
    drop(countdown);
    logger.await?;
    tokio::time::sleep(REWARD_NOTICE_DELAY + Duration::from_millis(100)).await;
    Ok(())
}
