//! Referral commission defaults and validation bounds.

use std::time::Duration;

/// A level row used to seed the default commission ladder
pub struct DefaultLevel {
    pub rate: f64,
    pub description: &'static str,
}

/// Bounds applied by the field mutators
pub struct CommissionBounds {
    pub min_rate: f64,
    pub max_rate: f64,
    pub min_withdrawal: f64,
}

pub struct CommissionConfig {
    pub default_rate: f64,
    pub default_min_withdrawal: f64,
    /// Rate given to a freshly appended level
    pub new_level_rate: f64,
    /// Levels shown when the remote document carries none
    pub default_levels: &'static [DefaultLevel],
    pub bounds: CommissionBounds,
}

pub const COMMISSION: CommissionConfig = CommissionConfig {
    default_rate: 10.0,
    default_min_withdrawal: 10.0,
    new_level_rate: 1.0,
    default_levels: &[
        DefaultLevel {
            rate: 10.0,
            description: "Direct Referral",
        },
        DefaultLevel {
            rate: 5.0,
            description: "Second Level",
        },
        DefaultLevel {
            rate: 2.0,
            description: "Third Level",
        },
    ],
    bounds: CommissionBounds {
        min_rate: 0.0,
        max_rate: 100.0,
        min_withdrawal: 0.0,
    },
};

/// How long a success/failure message stays on screen
pub const MESSAGE_TTL: Duration = Duration::from_secs(4);
