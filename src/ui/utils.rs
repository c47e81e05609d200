use eframe::egui::{Context, Id, RichText, TextEdit, Ui, Visuals};
use std::collections::HashMap;

use crate::ui::config::UI_CONFIG;

/// Creates a colored sub-section heading using the configured label color
pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.card;
    visuals.panel_fill = UI_CONFIG.colors.central_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Formats a number the way an operator typed it: no trailing ".0".
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// A single-line text field that mirrors `current` from the model.
///
/// While the field has focus the operator's raw text is kept in `buffers`, so
/// partial input such as "12." survives between frames. Once focus leaves,
/// the field shows the model value again, which is how rejected input
/// disappears. Returns the raw text whenever it changed this frame.
pub fn mirrored_text_field(
    ui: &mut Ui,
    buffers: &mut HashMap<Id, String>,
    id: Id,
    current: &str,
    width: f32,
) -> Option<String> {
    let buffer = buffers.entry(id).or_insert_with(|| current.to_string());
    let response = ui.add(TextEdit::singleline(&mut *buffer).id(id).desired_width(width));

    if response.changed() {
        return Some(buffer.clone());
    }
    if !response.has_focus() && buffer != current {
        *buffer = current.to_string();
    }
    None
}
