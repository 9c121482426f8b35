pub mod config;
pub mod log;
pub mod stats;
pub mod timer;

use std::sync::Arc;

use studylog_core::store::{HttpBackend, RecordStore};
use studylog_core::{Config, Notifier, SilentNotifier, StderrNotifier};

pub type CliError = Box<dyn std::error::Error>;

/// Notification sink honoring the `notifications.enabled` toggle.
pub fn notifier_for(config: &Config) -> Arc<dyn Notifier> {
    if config.notifications.enabled {
        Arc::new(StderrNotifier)
    } else {
        Arc::new(SilentNotifier)
    }
}

/// Build a store from the on-disk config and load the remote caches.
///
/// Initialization failure is already reported through the notifier; we
/// still bail so commands do not run against an empty cache.
pub async fn open_store() -> Result<RecordStore<HttpBackend>, CliError> {
    let config = Config::load()?;
    let backend = HttpBackend::from_config(&config.backend)?;
    let mut store = RecordStore::new(backend, notifier_for(&config));
    if !store.initialize().await {
        return Err("could not load study data from the backend".into());
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_selection_follows_config_toggle() {
        let mut config = Config::default();
        assert_eq!(notifier_for(&config).name(), "stderr");

        config.notifications.enabled = false;
        assert_eq!(notifier_for(&config).name(), "silent");
    }
}
