use eframe::egui::{Color32, RichText, Ui};

use crate::panel::MessageKind;
use crate::ui::config::UI_CONFIG;

/// Extension trait to add semantic styling methods directly to `egui::Ui`.
pub trait UiStyleExt {
    /// Renders small, gray text (good for labels like "Currency:").
    fn label_subdued(&mut self, text: impl Into<String>);

    /// Renders a big value over a subdued caption, used by the preview cards.
    fn stat_card(&mut self, value: &str, caption: &str, color: Color32);

    /// Renders a section header using the configured global color.
    fn label_header(&mut self, text: impl Into<String>);

    /// Renders a sub-section header using the configured global color.
    fn label_subheader(&mut self, text: impl Into<String>);

    /// Renders an error message (Red).
    fn label_error(&mut self, text: impl Into<String>);

    /// Renders a transient banner colored by its kind.
    fn label_message(&mut self, kind: MessageKind, text: &str);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.label));
    }

    fn stat_card(&mut self, value: &str, caption: &str, color: Color32) {
        self.group(|ui| {
            ui.set_min_width(150.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(value).heading().strong().color(color));
                ui.label_subdued(caption);
            });
        });
    }

    fn label_header(&mut self, text: impl Into<String>) {
        self.heading(RichText::new(text).color(UI_CONFIG.colors.heading).strong());
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(
            RichText::new(text)
                .strong()
                .color(UI_CONFIG.colors.subsection_heading),
        );
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(Color32::from_rgb(252, 165, 165)));
    }

    fn label_message(&mut self, kind: MessageKind, text: &str) {
        let (icon, color) = match kind {
            MessageKind::Success => ("✔", UI_CONFIG.colors.success),
            MessageKind::Warning => ("⚠", UI_CONFIG.colors.warning),
            MessageKind::Failure => ("✖", UI_CONFIG.colors.failure),
        };
        self.label(RichText::new(format!("{icon} {text}")).strong().color(color));
    }
}
