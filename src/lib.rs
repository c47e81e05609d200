#![allow(clippy::collapsible_if)]

// Core modules
pub mod config;
pub mod domain;
pub mod panel;
pub mod store;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use domain::{AppConfig, CommissionLevel, Currency, ReferralCommission, SliderImage};
pub use panel::{PanelStatus, SettingsPanel};
pub use store::{ConfigStore, InMemoryStore, JsonFileStore, StoreError, Subscription};
pub use ui::ReferralAdminApp;

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON file holding the configuration documents
    #[arg(long, default_value = config::STORE.default_store_file)]
    pub store: PathBuf,

    /// Keep documents in memory only (nothing is written to disk)
    #[arg(long, default_value_t = false, conflicts_with = "store")]
    pub memory: bool,
}

impl Cli {
    /// Builds the store selected on the command line, with a label for the status bar
    pub fn open_store(&self) -> (Arc<dyn ConfigStore>, String) {
        if self.memory {
            (Arc::new(InMemoryStore::new()), "in-memory".to_string())
        } else {
            (
                Arc::new(JsonFileStore::new(&self.store)),
                self.store.display().to_string(),
            )
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    store: Arc<dyn ConfigStore>,
    store_label: String,
) -> Box<dyn eframe::App> {
    Box::new(ui::ReferralAdminApp::new(cc, store, store_label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_to_file_store() {
        let cli = Cli::parse_from(["referral-admin"]);
        assert!(!cli.memory);
        assert_eq!(cli.store, PathBuf::from(config::STORE.default_store_file));
        let (_, label) = cli.open_store();
        assert_eq!(label, config::STORE.default_store_file);
    }

    #[test]
    fn memory_flag_selects_in_memory_store() {
        let cli = Cli::parse_from(["referral-admin", "--memory"]);
        let (_, label) = cli.open_store();
        assert_eq!(label, "in-memory");
    }

    #[test]
    fn memory_and_store_conflict() {
        assert!(Cli::try_parse_from(["referral-admin", "--memory", "--store", "x.json"]).is_err());
    }
}
