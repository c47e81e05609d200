use eframe::{Frame, egui};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::STORE;
use crate::panel::SettingsPanel;
use crate::store::ConfigStore;
use crate::ui::ui_panels::SliderDraft;
use crate::ui::utils::setup_custom_visuals;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Window-level preferences persisted by eframe between runs
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiPrefs {
    pub show_preview: bool,
    pub show_display_settings: bool,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            show_preview: true,
            show_display_settings: true,
        }
    }
}

pub struct ReferralAdminApp {
    // None only after on_exit has released the store subscription
    pub(super) panel: Option<SettingsPanel>,
    pub(super) prefs: UiPrefs,
    pub(super) store_label: String,
    // Raw text of focused form fields, keyed by widget id
    pub(super) edit_buffers: HashMap<egui::Id, String>,
    pub(super) slider_draft: SliderDraft,
}

impl ReferralAdminApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: Arc<dyn ConfigStore>,
        store_label: impl Into<String>,
    ) -> Self {
        // Attempt to load the persisted preferences
        let prefs = cc
            .storage
            .and_then(|storage| eframe::get_value::<UiPrefs>(storage, eframe::APP_KEY))
            .unwrap_or_default();

        Self {
            panel: Some(SettingsPanel::mount(store)),
            prefs,
            store_label: store_label.into(),
            edit_buffers: HashMap::new(),
            slider_draft: SliderDraft::default(),
        }
    }

    pub(super) fn reload_panel(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            panel.reload();
        }
        self.edit_buffers.clear();
    }
}

impl eframe::App for ReferralAdminApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(panel) = self.panel.take() {
            panel.unmount();
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.prefs);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        panel.update();

        // Store pushes and save completions arrive off the UI thread.
        let repaint_after = if panel.is_saving() || panel.message().is_some() {
            Duration::from_millis(100)
        } else {
            STORE.file_poll_interval
        };
        ctx.request_repaint_after(repaint_after);

        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
    }
}
