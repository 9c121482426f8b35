use clap::Subcommand;

use studylog_core::Config;

use super::CliError;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file if none exists
    Init,
}

pub fn run(action: ConfigAction) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigAction::Init => {
            let path = Config::path()?;
            if path.exists() {
                println!("config already exists at {}", path.display());
            } else {
                Config::default().save()?;
                println!("wrote default config to {}", path.display());
            }
        }
    }
    Ok(())
}
