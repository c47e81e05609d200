//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every flag is further gated by `cfg(debug_assertions)`
//! at the call site.

pub struct DebugFlags {
    /// Emit a log line for every snapshot pushed by the store.
    pub print_store_events: bool,
    /// Emit UI interaction logs (field edits, level add/remove, saves).
    pub print_ui_interactions: bool,
    /// Emit per-field merge fallbacks when an inbound snapshot is partial.
    pub print_snapshot_merge: bool,
    /// Emit file watcher polling details for the JSON file store.
    pub print_file_watcher: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_store_events: false,
    print_ui_interactions: true,
    print_snapshot_merge: false,
    print_file_watcher: false,
    print_shutdown: false,
};
