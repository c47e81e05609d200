use eframe::egui::{
    Button, CentralPanel, Context, Frame, Margin, RichText, ScrollArea, Spinner, TopBottomPanel, Ui,
};

use crate::domain::ReferralCommission;
use crate::panel::PanelStatus;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{CommissionPanel, DisplaySettingsPanel, Panel, apply_settings_event};
use crate::ui::utils::{format_number, spaced_separator};

use super::app::ReferralAdminApp;

impl ReferralAdminApp {
    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.card)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label_subdued(format!("{}: {}", UI_TEXT.store_label, self.store_label));
                    ui.separator();

                    let Some(panel) = self.panel.as_ref() else {
                        return;
                    };
                    if panel.is_saving() {
                        ui.add(Spinner::new());
                        ui.label_subdued(UI_TEXT.saving);
                        ui.separator();
                    }
                    if let Some(message) = panel.message() {
                        ui.label_message(message.kind, &message.text);
                    }

                    ui.with_layout(
                        eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
                        |ui| {
                            ui.toggle_value(&mut self.prefs.show_display_settings, "🖼 Display");
                            ui.toggle_value(&mut self.prefs.show_preview, "👁 Preview");
                        },
                    );
                });
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(16));
        CentralPanel::default().frame(central_frame).show(ctx, |ui| {
            let status = match self.panel.as_ref() {
                Some(panel) => panel.status().clone(),
                None => return,
            };
            match status {
                PanelStatus::Loading => render_loading(ui),
                PanelStatus::Error(message) => {
                    if render_error(ui, &message) {
                        self.reload_panel();
                    }
                }
                PanelStatus::Ready => self.render_form(ui),
            }
        });
    }

    fn render_form(&mut self, ui: &mut Ui) {
        let Some(panel) = self.panel.as_mut() else {
            return;
        };

        let mut events = Vec::new();
        ScrollArea::vertical().id_salt("settings_form").show(ui, |ui| {
            ui.set_max_width(UI_CONFIG.form_max_width);

            card(ui, |ui| {
                let mut commission = CommissionPanel::new(
                    &panel.config().referral_commission,
                    &mut self.edit_buffers,
                    panel.is_saving(),
                );
                events.extend(commission.render(ui));
            });

            if self.prefs.show_preview {
                card(ui, |ui| render_preview(ui, &panel.config().referral_commission));
            }

            if self.prefs.show_display_settings {
                card(ui, |ui| {
                    let mut display = DisplaySettingsPanel::new(
                        panel.config(),
                        &mut self.edit_buffers,
                        &mut self.slider_draft,
                        panel.is_saving(),
                    );
                    events.extend(display.render(ui));
                });
            }
        });

        for event in events {
            apply_settings_event(panel, event);
        }
    }
}

fn card(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    Frame::new()
        .fill(UI_CONFIG.colors.card)
        .corner_radius(8.0)
        .inner_margin(Margin::same(16))
        .show(ui, add_contents);
    ui.add_space(16.0);
}

fn render_loading(ui: &mut Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add(Spinner::new().size(48.0));
            ui.label(UI_TEXT.loading);
        });
    });
}

/// Returns true when the reload button was pressed.
fn render_error(ui: &mut Ui, message: &str) -> bool {
    ui.heading(RichText::new(UI_TEXT.error_heading).color(UI_CONFIG.colors.failure));
    ui.add_space(10.0);
    Frame::new()
        .fill(UI_CONFIG.colors.card)
        .inner_margin(Margin::same(12))
        .show(ui, |ui| ui.label_error(message));
    ui.add_space(10.0);
    ui.add(Button::new(UI_TEXT.reload_button)).clicked()
}

fn render_preview(ui: &mut Ui, commission: &ReferralCommission) {
    ui.label_header(UI_TEXT.preview_heading);
    ui.add_space(10.0);

    ui.horizontal_wrapped(|ui| {
        ui.stat_card(
            &format!("{}%", format_number(commission.commission_rate)),
            UI_TEXT.preview_default_rate,
            UI_CONFIG.colors.active,
        );
        ui.stat_card(
            &format!(
                "{} {}",
                format_number(commission.min_withdrawal),
                commission.currency
            ),
            UI_TEXT.preview_min_withdrawal,
            UI_CONFIG.colors.heading,
        );
        ui.stat_card(
            &commission.levels.len().to_string(),
            UI_TEXT.preview_level_count,
            UI_CONFIG.colors.warning,
        );
        let (status, color) = if commission.enabled {
            (UI_TEXT.status_active, UI_CONFIG.colors.active)
        } else {
            (UI_TEXT.status_inactive, UI_CONFIG.colors.inactive)
        };
        ui.stat_card(status, UI_TEXT.preview_status, color);
    });

    spaced_separator(ui);
    ui.label_subheader(UI_TEXT.preview_levels_heading);
    for level in &commission.levels {
        ui.horizontal(|ui| {
            ui.label(level.description.as_str());
            ui.with_layout(
                eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
                |ui| {
                    ui.label(
                        RichText::new(format!("{}%", format_number(level.rate)))
                            .strong()
                            .color(UI_CONFIG.colors.active),
                    );
                },
            );
        });
    }
}
