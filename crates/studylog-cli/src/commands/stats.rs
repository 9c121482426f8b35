use clap::Subcommand;
use serde_json::json;

use super::CliError;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Total study time across all sessions
    Total,
    /// Most studied topics, ranked by total minutes
    Topics,
}

pub async fn run(action: StatsAction) -> Result<(), CliError> {
    let store = super::open_store().await?;

    match action {
        StatsAction::Total => {
            let summary = json!({
                "session_count": store.sessions().len(),
                "total_min": store.total_study_time(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Topics => {
            let ranked = store.most_studied_topics();
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        }
    }
    Ok(())
}
