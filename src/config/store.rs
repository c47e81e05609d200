//! Document store configuration.

use std::time::Duration;

/// Settings shared by every `ConfigStore` backend
pub struct StoreConfig {
    /// Fixed logical key of the application configuration document
    pub config_path: &'static str,
    /// How often the JSON file store checks its backing file for changes
    pub file_poll_interval: Duration,
    /// Backing file used by the JSON file store when none is given on the CLI
    pub default_store_file: &'static str,
}

pub const STORE: StoreConfig = StoreConfig {
    config_path: "appConfig",
    file_poll_interval: Duration::from_millis(500),
    default_store_file: "referral_admin_store.json",
};
