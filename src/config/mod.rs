//! Configuration module for the referral admin application.

pub mod commission;
pub mod store;

mod debug; // Private: callers use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;

// Re-export commonly used items
pub use commission::{COMMISSION, MESSAGE_TTL};
pub use persistence::APP_STATE_PATH;
pub use store::STORE;
