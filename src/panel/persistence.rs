use poll_promise::Promise;
use std::sync::Arc;

use crate::config::STORE;
use crate::store::StoreError;

use super::settings::SettingsPanel;
use super::state::MessageKind;

pub(super) const SAVE_SUCCESS_TEXT: &str = "Referral commission settings updated successfully!";

impl SettingsPanel {
    /// Writes the whole local document back to the store, last writer wins.
    ///
    /// Returns `false` when a save is already in flight. The outcome is picked
    /// up by [`SettingsPanel::poll_save`] and shown as a transient message; a
    /// failed write never changes the panel status.
    pub fn save(&mut self) -> bool {
        if self.save_promise.is_some() {
            return false;
        }

        let document = match self.config.to_document() {
            Ok(document) => document,
            Err(e) => {
                log::error!("Failed to serialize config: {}", e);
                self.show_message(MessageKind::Failure, e.to_string());
                return false;
            }
        };

        log::info!("Saving config to {}", STORE.config_path);
        let store = Arc::clone(&self.store);
        self.save_promise = Some(Promise::spawn_thread("config_save", move || {
            store.write(STORE.config_path, document)
        }));
        true
    }

    pub fn poll_save(&mut self) {
        let outcome = self
            .save_promise
            .as_ref()
            .and_then(|promise| promise.ready().cloned());

        if let Some(result) = outcome {
            self.save_promise = None;
            self.apply_save_result(result);
        }
    }

    pub fn is_saving(&self) -> bool {
        self.save_promise.is_some()
    }

    fn apply_save_result(&mut self, result: Result<(), StoreError>) {
        match result {
            Ok(()) => {
                log::info!("Config saved");
                self.show_message(MessageKind::Success, SAVE_SUCCESS_TEXT);
            }
            Err(err) => {
                log::error!("Error updating referral commission: {}", err);
                self.show_message(MessageKind::Failure, err.message());
            }
        }
    }
}
