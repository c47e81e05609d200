//! Document store capability used by the settings panel.
//!
//! The panel never reaches for a global client: it is handed an
//! `Arc<dyn ConfigStore>` at construction so tests and the `--memory` mode can
//! swap in an in-process store.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use serde_json::Value;
use std::fmt;

/// Receives the full document at the subscribed path (`None` when absent)
pub type SnapshotFn = Box<dyn Fn(Option<Value>) + Send + Sync>;
/// Receives a terminal read failure
pub type ErrorFn = Box<dyn Fn(StoreError) + Send + Sync>;

/// Error types for store operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The subscription could not be established
    Setup(String),
    /// The live subscription failed after it was established
    Read(String),
    /// A document write was rejected
    Write(String),
}

impl StoreError {
    /// The human-readable message without the category prefix
    pub fn message(&self) -> &str {
        match self {
            StoreError::Setup(msg) | StoreError::Read(msg) | StoreError::Write(msg) => msg,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Setup(msg) => write!(f, "Setup Error: {}", msg),
            StoreError::Read(msg) => write!(f, "Store Error: {}", msg),
            StoreError::Write(msg) => write!(f, "Write Error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// A live-document store.
pub trait ConfigStore: Send + Sync {
    /// Starts pushing the document at `path` to `on_snapshot`, beginning with
    /// its current value. `on_error` fires at most once and ends the feed.
    fn subscribe(
        &self,
        path: &str,
        on_snapshot: SnapshotFn,
        on_error: ErrorFn,
    ) -> Result<Subscription, StoreError>;

    /// Replaces the whole document at `path`. Blocks until the store
    /// acknowledges the write.
    fn write(&self, path: &str, document: Value) -> Result<(), StoreError>;
}

/// Handle to a live subscription. Released exactly once, either through
/// [`Subscription::unsubscribe`] or when dropped.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
