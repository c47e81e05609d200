//! File persistence configuration

// App state persistence
/// Path for saving/loading egui window state between runs
pub const APP_STATE_PATH: &str = ".states.json";
