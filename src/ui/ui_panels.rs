use eframe::egui::{Button, ComboBox, Grid, Id, RichText, TextEdit, Ui};
use std::collections::HashMap;
use strum::IntoEnumIterator;

use crate::domain::{AppConfig, Currency, MoveDirection, ReferralCommission};
use crate::panel::SettingsPanel;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{
    colored_subsection_heading, format_number, mirrored_text_field, spaced_separator,
};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Everything an operator can do on the form. Raw text is forwarded as typed;
/// validation happens in the settings panel.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    ToggleEnabled,
    CommissionRate(String),
    MinWithdrawal(String),
    Currency(String),
    LevelRate(usize, String),
    LevelDescription(usize, String),
    AddLevel,
    RemoveLevel(usize),
    AppName(String),
    LogoUrl(String),
    SupportUrl(String),
    TutorialVideoId(String),
    AddSliderImage { url: String, alt: String },
    RemoveSliderImage(usize),
    MoveSliderImage(usize, MoveDirection),
    Save,
}

/// Routes a form event to the matching settings panel mutator.
pub fn apply_settings_event(panel: &mut SettingsPanel, event: SettingsEvent) {
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_ui_interactions {
        log::info!("UI event: {:?}", event);
    }

    match event {
        SettingsEvent::ToggleEnabled => panel.toggle_enabled(),
        SettingsEvent::CommissionRate(input) => {
            panel.set_commission_rate(&input);
        }
        SettingsEvent::MinWithdrawal(input) => {
            panel.set_min_withdrawal(&input);
        }
        SettingsEvent::Currency(code) => {
            panel.set_currency(&code);
        }
        SettingsEvent::LevelRate(index, input) => {
            panel.set_level_rate(index, &input);
        }
        SettingsEvent::LevelDescription(index, text) => {
            panel.set_level_description(index, &text);
        }
        SettingsEvent::AddLevel => panel.add_level(),
        SettingsEvent::RemoveLevel(index) => {
            panel.remove_level(index);
        }
        SettingsEvent::AppName(value) => panel.set_app_name(&value),
        SettingsEvent::LogoUrl(value) => panel.set_logo_url(&value),
        SettingsEvent::SupportUrl(value) => panel.set_support_url(&value),
        SettingsEvent::TutorialVideoId(value) => panel.set_tutorial_video_id(&value),
        SettingsEvent::AddSliderImage { url, alt } => {
            panel.add_slider_image(&url, &alt);
        }
        SettingsEvent::RemoveSliderImage(index) => {
            panel.remove_slider_image(index);
        }
        SettingsEvent::MoveSliderImage(index, direction) => {
            panel.move_slider_image(index, direction);
        }
        SettingsEvent::Save => {
            panel.save();
        }
    }
}

/// Panel for the referral commission block and its level ladder
pub struct CommissionPanel<'a> {
    commission: &'a ReferralCommission,
    buffers: &'a mut HashMap<Id, String>,
    is_saving: bool,
}

impl<'a> CommissionPanel<'a> {
    pub fn new(
        commission: &'a ReferralCommission,
        buffers: &'a mut HashMap<Id, String>,
        is_saving: bool,
    ) -> Self {
        Self {
            commission,
            buffers,
            is_saving,
        }
    }

    fn render_header(&mut self, ui: &mut Ui, events: &mut Vec<SettingsEvent>) {
        ui.horizontal(|ui| {
            ui.label_header(format!("💰 {}", UI_TEXT.commission_heading));
            ui.with_layout(eframe::egui::Layout::right_to_left(eframe::egui::Align::Center), |ui| {
                let mut enabled = self.commission.enabled;
                let label = if enabled {
                    UI_TEXT.status_active
                } else {
                    UI_TEXT.status_inactive
                };
                if ui.toggle_value(&mut enabled, label).clicked() {
                    events.push(SettingsEvent::ToggleEnabled);
                }
                ui.label(UI_TEXT.enable_system);
            });
        });
    }

    fn render_global_fields(&mut self, ui: &mut Ui, events: &mut Vec<SettingsEvent>) {
        Grid::new("commission_fields")
            .num_columns(3)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                ui.label_subdued(UI_TEXT.commission_rate_label);
                ui.label_subdued(UI_TEXT.min_withdrawal_label);
                ui.label_subdued(UI_TEXT.currency_label);
                ui.end_row();

                if let Some(input) = mirrored_text_field(
                    ui,
                    self.buffers,
                    Id::new("commission_rate"),
                    &format_number(self.commission.commission_rate),
                    UI_CONFIG.number_field_width,
                ) {
                    events.push(SettingsEvent::CommissionRate(input));
                }

                if let Some(input) = mirrored_text_field(
                    ui,
                    self.buffers,
                    Id::new("min_withdrawal"),
                    &format_number(self.commission.min_withdrawal),
                    UI_CONFIG.number_field_width,
                ) {
                    events.push(SettingsEvent::MinWithdrawal(input));
                }

                ComboBox::from_id_salt("currency")
                    .selected_text(self.commission.currency.to_string())
                    .show_ui(ui, |ui| {
                        for currency in Currency::iter() {
                            let selected = currency == self.commission.currency;
                            if ui.selectable_label(selected, currency.to_string()).clicked()
                                && !selected
                            {
                                events.push(SettingsEvent::Currency(currency.to_string()));
                            }
                        }
                    });
                ui.end_row();
            });
    }

    fn render_levels(&mut self, ui: &mut Ui, events: &mut Vec<SettingsEvent>) {
        ui.horizontal(|ui| {
            ui.label_subheader(UI_TEXT.levels_heading);
            ui.with_layout(eframe::egui::Layout::right_to_left(eframe::egui::Align::Center), |ui| {
                if ui.button(UI_TEXT.add_level_button).clicked() {
                    events.push(SettingsEvent::AddLevel);
                }
            });
        });
        ui.add_space(5.0);

        let can_remove = self.commission.levels.len() > 1;
        Grid::new("commission_levels")
            .num_columns(4)
            .striped(true)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                ui.label_subdued("");
                ui.label_subdued(UI_TEXT.description_label);
                ui.label_subdued(UI_TEXT.level_rate_label);
                ui.end_row();

                for (index, level) in self.commission.levels.iter().enumerate() {
                    ui.label(format!("Level {}", level.level));

                    if let Some(text) = mirrored_text_field(
                        ui,
                        self.buffers,
                        Id::new(("level_description", index)),
                        &level.description,
                        UI_CONFIG.level_description_width,
                    ) {
                        events.push(SettingsEvent::LevelDescription(index, text));
                    }

                    if let Some(input) = mirrored_text_field(
                        ui,
                        self.buffers,
                        Id::new(("level_rate", index)),
                        &format_number(level.rate),
                        UI_CONFIG.number_field_width,
                    ) {
                        events.push(SettingsEvent::LevelRate(index, input));
                    }

                    if can_remove {
                        let remove = Button::new(
                            RichText::new(UI_TEXT.remove_button).color(UI_CONFIG.colors.failure),
                        );
                        if ui.add(remove).clicked() {
                            events.push(SettingsEvent::RemoveLevel(index));
                        }
                    } else {
                        ui.label("");
                    }
                    ui.end_row();
                }
            });
    }
}

impl<'a> Panel for CommissionPanel<'a> {
    type Event = SettingsEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        self.render_header(ui, &mut events);
        ui.add_space(10.0);
        self.render_global_fields(ui, &mut events);
        spaced_separator(ui);
        self.render_levels(ui, &mut events);
        ui.add_space(10.0);

        let label = if self.is_saving {
            UI_TEXT.saving
        } else {
            UI_TEXT.save_commission_button
        };
        if ui.add_enabled(!self.is_saving, Button::new(label)).clicked() {
            events.push(SettingsEvent::Save);
        }
        events
    }
}

/// Text typed into the "add slider image" row but not yet submitted
#[derive(Debug, Clone, Default)]
pub struct SliderDraft {
    pub url: String,
    pub alt: String,
}

/// Panel for the app-wide display settings and slider images
pub struct DisplaySettingsPanel<'a> {
    config: &'a AppConfig,
    buffers: &'a mut HashMap<Id, String>,
    draft: &'a mut SliderDraft,
    is_saving: bool,
}

impl<'a> DisplaySettingsPanel<'a> {
    pub fn new(
        config: &'a AppConfig,
        buffers: &'a mut HashMap<Id, String>,
        draft: &'a mut SliderDraft,
        is_saving: bool,
    ) -> Self {
        Self {
            config,
            buffers,
            draft,
            is_saving,
        }
    }

    fn render_text_settings(&mut self, ui: &mut Ui, events: &mut Vec<SettingsEvent>) {
        let width = UI_CONFIG.form_max_width / 2.0;
        let rows: [(&str, &str, &str, fn(String) -> SettingsEvent); 4] = [
            (
                UI_TEXT.app_name_label,
                "app_name",
                self.config.app_name.as_str(),
                SettingsEvent::AppName,
            ),
            (
                UI_TEXT.logo_url_label,
                "logo_url",
                self.config.logo_url.as_str(),
                SettingsEvent::LogoUrl,
            ),
            (
                UI_TEXT.support_url_label,
                "support_url",
                self.config.support_url.as_str(),
                SettingsEvent::SupportUrl,
            ),
            (
                UI_TEXT.tutorial_video_label,
                "tutorial_video_id",
                self.config.tutorial_video_id.as_str(),
                SettingsEvent::TutorialVideoId,
            ),
        ];

        Grid::new("display_settings")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for (label, salt, current, to_event) in rows {
                    ui.label_subdued(label);
                    let edited =
                        mirrored_text_field(ui, self.buffers, Id::new(salt), current, width);
                    if let Some(text) = edited {
                        events.push(to_event(text));
                    }
                    ui.end_row();
                }
            });
    }

    fn render_slider_images(&mut self, ui: &mut Ui, events: &mut Vec<SettingsEvent>) {
        ui.label(colored_subsection_heading(UI_TEXT.slider_heading));
        ui.add_space(5.0);

        let images = &self.config.slider_images;
        if images.is_empty() {
            ui.label_subdued(UI_TEXT.slider_empty);
        }
        for (index, image) in images.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(format!("#{}", image.order + 1));
                ui.label(image.url.as_str());
                if !image.alt.is_empty() {
                    ui.label_subdued(format!("({})", image.alt));
                }
                let trailing = eframe::egui::Layout::right_to_left(eframe::egui::Align::Center);
                ui.with_layout(trailing, |ui| {
                    if ui.small_button("🗑").clicked() {
                        events.push(SettingsEvent::RemoveSliderImage(index));
                    }
                    let can_move_down = index + 1 < images.len();
                    if ui.add_enabled(can_move_down, Button::new("⏷").small()).clicked() {
                        events.push(SettingsEvent::MoveSliderImage(index, MoveDirection::Down));
                    }
                    if ui.add_enabled(index > 0, Button::new("⏶").small()).clicked() {
                        events.push(SettingsEvent::MoveSliderImage(index, MoveDirection::Up));
                    }
                });
            });
        }

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.add(
                TextEdit::singleline(&mut self.draft.url)
                    .hint_text(UI_TEXT.slider_url_hint)
                    .desired_width(UI_CONFIG.form_max_width / 2.0),
            );
            ui.add(
                TextEdit::singleline(&mut self.draft.alt)
                    .hint_text(UI_TEXT.slider_alt_hint)
                    .desired_width(UI_CONFIG.level_description_width / 2.0),
            );
            let can_add = !self.draft.url.trim().is_empty();
            if ui.add_enabled(can_add, Button::new(UI_TEXT.slider_add_button)).clicked() {
                let draft = std::mem::take(self.draft);
                events.push(SettingsEvent::AddSliderImage {
                    url: draft.url,
                    alt: draft.alt,
                });
            }
        });
    }
}

impl<'a> Panel for DisplaySettingsPanel<'a> {
    type Event = SettingsEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        ui.label_header(format!("🖼 {}", UI_TEXT.display_heading));
        ui.add_space(10.0);
        self.render_text_settings(ui, &mut events);
        spaced_separator(ui);
        self.render_slider_images(ui, &mut events);
        ui.add_space(10.0);

        if ui
            .add_enabled(!self.is_saving, Button::new(UI_TEXT.save_display_button))
            .clicked()
        {
            events.push(SettingsEvent::Save);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::MessageKind;
    use crate::store::InMemoryStore;
    use std::sync::Arc;

    fn panel() -> SettingsPanel {
        SettingsPanel::mount(Arc::new(InMemoryStore::new()))
    }

    #[test]
    fn events_route_to_mutators() {
        let mut panel = panel();
        let events = vec![
            SettingsEvent::ToggleEnabled,
            SettingsEvent::CommissionRate("12.5".into()),
            SettingsEvent::MinWithdrawal("25".into()),
            SettingsEvent::Currency("BTC".into()),
            SettingsEvent::AddLevel,
            SettingsEvent::LevelRate(3, "0.5".into()),
            SettingsEvent::LevelDescription(3, "Fourth Level".into()),
            SettingsEvent::AppName("DreamEarn".into()),
            SettingsEvent::AddSliderImage {
                url: "https://cdn.example/a.png".into(),
                alt: "a".into(),
            },
        ];
        for event in events {
            apply_settings_event(&mut panel, event);
        }

        let config = panel.config();
        let commission = &config.referral_commission;
        assert!(commission.enabled);
        assert_eq!(commission.commission_rate, 12.5);
        assert_eq!(commission.min_withdrawal, 25.0);
        assert_eq!(commission.currency, Currency::Btc);
        assert_eq!(commission.levels.len(), 4);
        assert_eq!(commission.levels[3].rate, 0.5);
        assert_eq!(commission.levels[3].description, "Fourth Level");
        assert_eq!(config.app_name, "DreamEarn");
        assert_eq!(config.slider_images.len(), 1);
    }

    #[test]
    fn invalid_events_are_absorbed() {
        let mut panel = panel();
        let before = panel.config().clone();
        for event in [
            SettingsEvent::CommissionRate("150".into()),
            SettingsEvent::MinWithdrawal("-1".into()),
            SettingsEvent::Currency("DOGE".into()),
            SettingsEvent::LevelRate(0, "abc".into()),
            SettingsEvent::RemoveSliderImage(3),
        ] {
            apply_settings_event(&mut panel, event);
        }
        assert_eq!(panel.config(), &before);
        assert!(panel.message().is_none());
    }

    #[test]
    fn remove_event_on_single_level_warns() {
        let mut panel = panel();
        apply_settings_event(&mut panel, SettingsEvent::RemoveLevel(0));
        apply_settings_event(&mut panel, SettingsEvent::RemoveLevel(0));
        apply_settings_event(&mut panel, SettingsEvent::RemoveLevel(0));
        assert_eq!(panel.config().referral_commission.levels.len(), 1);
        assert_eq!(panel.message().map(|m| m.kind), Some(MessageKind::Warning));
    }
}
