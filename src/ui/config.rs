use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub card: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub failure: Color32,
    pub active: Color32,
    pub inactive: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub form_max_width: f32,
    pub level_description_width: f32,
    pub number_field_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::from_rgb(147, 197, 253),
        subsection_heading: Color32::from_rgb(134, 239, 172),
        central_panel: Color32::from_rgb(17, 24, 39),
        card: Color32::from_rgb(31, 41, 55),
        success: Color32::from_rgb(34, 197, 94),
        warning: Color32::from_rgb(234, 179, 8),
        failure: Color32::from_rgb(239, 68, 68),
        active: Color32::from_rgb(74, 222, 128),
        inactive: Color32::from_rgb(156, 163, 175),
    },
    form_max_width: 960.0,
    level_description_width: 260.0,
    number_field_width: 90.0,
};
