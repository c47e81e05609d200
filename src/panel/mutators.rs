//! Field mutators. Each validates its raw input against the document's
//! constraints and only then touches local state; rejected input is dropped
//! without a message.

use crate::domain::{LevelRemovalError, MoveDirection};

use super::settings::SettingsPanel;
use super::state::MessageKind;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

impl SettingsPanel {
    pub fn set_commission_rate(&mut self, input: &str) -> bool {
        let applied = self.config.referral_commission.set_commission_rate(input);
        self.trace_edit("commission rate", input, applied);
        applied
    }

    pub fn set_min_withdrawal(&mut self, input: &str) -> bool {
        let applied = self.config.referral_commission.set_min_withdrawal(input);
        self.trace_edit("min withdrawal", input, applied);
        applied
    }

    pub fn set_currency(&mut self, input: &str) -> bool {
        let applied = self.config.referral_commission.set_currency(input);
        self.trace_edit("currency", input, applied);
        applied
    }

    pub fn toggle_enabled(&mut self) {
        self.config.referral_commission.toggle_enabled();
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!(
                "Commission system {}",
                if self.config.referral_commission.enabled {
                    "enabled"
                } else {
                    "disabled"
                }
            );
        }
    }

    pub fn set_level_rate(&mut self, index: usize, input: &str) -> bool {
        let applied = self.config.referral_commission.set_level_rate(index, input);
        self.trace_edit("level rate", input, applied);
        applied
    }

    pub fn set_level_description(&mut self, index: usize, description: &str) -> bool {
        self.config
            .referral_commission
            .set_level_description(index, description)
    }

    pub fn add_level(&mut self) {
        let _added = self.config.referral_commission.add_level();
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Added commission level {}", _added.level);
        }
    }

    /// Removes a level and renumbers the rest. The last remaining level is
    /// kept and a warning banner is shown instead.
    pub fn remove_level(&mut self, index: usize) -> bool {
        match self.config.referral_commission.remove_level(index) {
            Ok(_removed) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    log::info!(
                        "Removed commission level {} ({})",
                        _removed.level,
                        _removed.description
                    );
                }
                true
            }
            Err(err @ LevelRemovalError::LastLevel) => {
                self.show_message(MessageKind::Warning, err.to_string());
                false
            }
            Err(LevelRemovalError::OutOfRange(_)) => false,
        }
    }

    pub fn set_app_name(&mut self, value: &str) {
        self.config.app_name = value.to_string();
    }

    pub fn set_logo_url(&mut self, value: &str) {
        self.config.logo_url = value.trim().to_string();
    }

    pub fn set_support_url(&mut self, value: &str) {
        self.config.support_url = value.trim().to_string();
    }

    pub fn set_tutorial_video_id(&mut self, value: &str) {
        self.config.tutorial_video_id = value.trim().to_string();
    }

    pub fn add_slider_image(&mut self, url: &str, alt: &str) -> bool {
        self.config.add_slider_image(url, alt)
    }

    pub fn remove_slider_image(&mut self, index: usize) -> bool {
        self.config.remove_slider_image(index).is_some()
    }

    pub fn move_slider_image(&mut self, index: usize, direction: MoveDirection) -> bool {
        self.config.move_slider_image(index, direction)
    }

    fn trace_edit(&self, _field: &str, _input: &str, _applied: bool) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions && !_applied {
            log::info!("Dropped {} input {:?}", _field, _input);
        }
    }
}
