//! The settings panel: local view-state mirrored from the store, field
//! mutators, and the save path. Rendering lives in `crate::ui`.

mod mutators;
mod persistence;
pub mod settings;
pub mod state;

pub use settings::{SettingsPanel, SyncEvent};
pub use state::{MessageKind, PanelStatus, StatusMessage};
