use chrono::{NaiveDate, Utc};
use clap::Args;
use uuid::Uuid;

use super::CliError;

#[derive(Args)]
pub struct LogArgs {
    /// Duration in minutes
    #[arg(short, long)]
    minutes: u32,
    /// Topic to associate the session with
    #[arg(short, long)]
    topic: Option<Uuid>,
    /// Session date (defaults to today)
    #[arg(short, long)]
    date: Option<NaiveDate>,
    /// Free-form notes
    #[arg(short, long)]
    notes: Option<String>,
}

pub async fn run(args: LogArgs) -> Result<(), CliError> {
    let mut store = super::open_store().await?;
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    match store
        .create_session(args.topic, args.minutes, date, args.notes)
        .await
    {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        None => Err("session was not logged".into()),
    }
}
