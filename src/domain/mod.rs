// Domain types and value objects
pub mod app_config;
pub mod commission;
pub mod snapshot;

// Re-export commonly used types
pub use app_config::{AppConfig, MoveDirection, SliderImage};
pub use commission::{CommissionLevel, Currency, LevelRemovalError, ReferralCommission};
pub use snapshot::MergeFields;
