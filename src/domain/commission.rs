use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::config::COMMISSION;
use crate::domain::snapshot::{MergeFields, merge_field, merge_list};

/// Payout currencies an operator may choose for commissions
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Debug,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
    strum_macros::EnumString,
    strum_macros::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usdt,
    Usd,
    Eur,
    Btc,
    Eth,
}

/// One rung of the multi-level commission ladder
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommissionLevel {
    /// 1-based position in the ladder
    pub level: u32,
    /// Percentage paid at this depth
    pub rate: f64,
    pub description: String,
}

impl Default for CommissionLevel {
    fn default() -> Self {
        Self {
            level: 1,
            rate: COMMISSION.new_level_rate,
            description: String::new(),
        }
    }
}

/// Reasons a level cannot be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelRemovalError {
    /// Removing would leave the ladder empty
    LastLevel,
    /// No level exists at the requested index
    OutOfRange(usize),
}

impl fmt::Display for LevelRemovalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelRemovalError::LastLevel => {
                write!(f, "At least one commission level is required!")
            }
            LevelRemovalError::OutOfRange(index) => {
                write!(f, "No commission level at index {}", index)
            }
        }
    }
}

impl std::error::Error for LevelRemovalError {}

/// The referral commission block of the app configuration document.
///
/// Mutators validate their raw input first and only touch `self` when the
/// value is acceptable. Rejected input is dropped silently and the method
/// returns `false`, leaving the previous value in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferralCommission {
    pub enabled: bool,
    pub commission_rate: f64,
    pub min_withdrawal: f64,
    pub currency: Currency,
    pub levels: Vec<CommissionLevel>,
}

impl Default for ReferralCommission {
    fn default() -> Self {
        Self {
            enabled: false,
            commission_rate: COMMISSION.default_rate,
            min_withdrawal: COMMISSION.default_min_withdrawal,
            currency: Currency::default(),
            levels: default_levels(),
        }
    }
}

/// The ladder used whenever the stored document has none
pub fn default_levels() -> Vec<CommissionLevel> {
    COMMISSION
        .default_levels
        .iter()
        .enumerate()
        .map(|(idx, seed)| CommissionLevel {
            level: idx as u32 + 1,
            rate: seed.rate,
            description: seed.description.to_string(),
        })
        .collect()
}

/// Parses a percentage typed by the operator. Accepts finite values in [0, 100].
pub fn parse_percentage(input: &str) -> Option<f64> {
    let value = input.trim().parse::<f64>().ok()?;
    let bounds = &COMMISSION.bounds;
    (value.is_finite() && value >= bounds.min_rate && value <= bounds.max_rate).then_some(value)
}

/// Parses a non-negative finite amount typed by the operator.
pub fn parse_amount(input: &str) -> Option<f64> {
    let value = input.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= COMMISSION.bounds.min_withdrawal).then_some(value)
}

impl MergeFields for CommissionLevel {
    fn merge_fields(fields: &Map<String, Value>) -> Self {
        Self {
            level: merge_field(fields, "level"),
            rate: merge_field::<Option<f64>>(fields, "rate").unwrap_or(COMMISSION.new_level_rate),
            description: merge_field(fields, "description"),
        }
    }
}

// Unknown or mistyped currency codes fall back to the default currency.
impl MergeFields for ReferralCommission {
    fn merge_fields(fields: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            enabled: merge_field(fields, "enabled"),
            commission_rate: merge_field::<Option<f64>>(fields, "commissionRate")
                .unwrap_or(defaults.commission_rate),
            min_withdrawal: merge_field::<Option<f64>>(fields, "minWithdrawal")
                .unwrap_or(defaults.min_withdrawal),
            currency: merge_field(fields, "currency"),
            levels: merge_list(fields, "levels"),
        }
    }
}

impl ReferralCommission {
    pub fn set_commission_rate(&mut self, input: &str) -> bool {
        match parse_percentage(input) {
            Some(rate) => {
                self.commission_rate = rate;
                true
            }
            None => false,
        }
    }

    pub fn set_min_withdrawal(&mut self, input: &str) -> bool {
        match parse_amount(input) {
            Some(amount) => {
                self.min_withdrawal = amount;
                true
            }
            None => false,
        }
    }

    pub fn set_currency(&mut self, input: &str) -> bool {
        match Currency::from_str(input.trim()) {
            Ok(currency) => {
                self.currency = currency;
                true
            }
            Err(_) => false,
        }
    }

    pub fn toggle_enabled(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn set_level_rate(&mut self, index: usize, input: &str) -> bool {
        let Some(rate) = parse_percentage(input) else {
            return false;
        };
        match self.levels.get_mut(index) {
            Some(level) => {
                level.rate = rate;
                true
            }
            None => false,
        }
    }

    pub fn set_level_description(&mut self, index: usize, description: &str) -> bool {
        match self.levels.get_mut(index) {
            Some(level) => {
                level.description = description.to_string();
                true
            }
            None => false,
        }
    }

    /// Appends level N+1 with the starter rate. There is no upper bound.
    pub fn add_level(&mut self) -> &CommissionLevel {
        let next = self.levels.len() as u32 + 1;
        self.levels.push(CommissionLevel {
            level: next,
            rate: COMMISSION.new_level_rate,
            description: format!("Level {}", next),
        });
        &self.levels[self.levels.len() - 1]
    }

    pub fn remove_level(&mut self, index: usize) -> Result<CommissionLevel, LevelRemovalError> {
        if self.levels.len() <= 1 {
            return Err(LevelRemovalError::LastLevel);
        }
        if index >= self.levels.len() {
            return Err(LevelRemovalError::OutOfRange(index));
        }
        let removed = self.levels.remove(index);
        self.renumber_levels();
        Ok(removed)
    }

    /// Rewrites every `level` field so the ladder reads 1..N in order.
    pub fn renumber_levels(&mut self) {
        for (idx, level) in self.levels.iter_mut().enumerate() {
            level.level = idx as u32 + 1;
        }
    }

    /// Restores the level invariants on a block that came from the store.
    pub fn normalized(mut self) -> Self {
        if self.levels.is_empty() {
            self.levels = default_levels();
        } else {
            self.renumber_levels();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < f64::EPSILON
    }

    fn levels_are_contiguous(commission: &ReferralCommission) -> bool {
        commission
            .levels
            .iter()
            .enumerate()
            .all(|(idx, level)| level.level == idx as u32 + 1)
    }

    #[test]
    fn defaults_match_program_launch_values() {
        let commission = ReferralCommission::default();
        assert!(!commission.enabled);
        assert!(approx_eq(commission.commission_rate, 10.0));
        assert!(approx_eq(commission.min_withdrawal, 10.0));
        assert_eq!(commission.currency, Currency::Usdt);
        let rates: Vec<f64> = commission.levels.iter().map(|l| l.rate).collect();
        assert_eq!(rates, vec![10.0, 5.0, 2.0]);
        assert_eq!(commission.levels[0].description, "Direct Referral");
        assert!(levels_are_contiguous(&commission));
    }

    #[test]
    fn out_of_range_rate_is_dropped() {
        let mut commission = ReferralCommission::default();
        assert!(!commission.set_commission_rate("150"));
        assert!(approx_eq(commission.commission_rate, 10.0));
        assert!(!commission.set_commission_rate("abc"));
        assert!(!commission.set_commission_rate(""));
        assert!(!commission.set_commission_rate("NaN"));
        assert!(approx_eq(commission.commission_rate, 10.0));
    }

    #[test]
    fn rate_bounds_are_inclusive() {
        let mut commission = ReferralCommission::default();
        assert!(commission.set_commission_rate("0"));
        assert!(approx_eq(commission.commission_rate, 0.0));
        assert!(commission.set_commission_rate(" 100 "));
        assert!(approx_eq(commission.commission_rate, 100.0));
        assert!(commission.set_commission_rate("12.5"));
        assert!(approx_eq(commission.commission_rate, 12.5));
    }

    #[test]
    fn infinite_withdrawal_is_rejected() {
        let mut commission = ReferralCommission::default();
        assert!(!commission.set_min_withdrawal("inf"));
        assert!(!commission.set_min_withdrawal("-0.01"));
        assert!(approx_eq(commission.min_withdrawal, 10.0));
        assert!(commission.set_min_withdrawal("0"));
        assert!(approx_eq(commission.min_withdrawal, 0.0));
    }

    #[test]
    fn currency_accepts_only_known_codes() {
        let mut commission = ReferralCommission::default();
        assert!(commission.set_currency("ETH"));
        assert_eq!(commission.currency, Currency::Eth);
        assert!(!commission.set_currency("DOGE"));
        assert_eq!(commission.currency, Currency::Eth);

        let codes: Vec<String> = Currency::iter().map(|c| c.to_string()).collect();
        assert_eq!(codes, vec!["USDT", "USD", "EUR", "BTC", "ETH"]);
    }

    #[test]
    fn add_level_appends_next_number() {
        let mut commission = ReferralCommission::default();
        let added = commission.add_level().clone();
        assert_eq!(added.level, 4);
        assert!(approx_eq(added.rate, 1.0));
        assert_eq!(added.description, "Level 4");
        assert_eq!(commission.levels.len(), 4);
    }

    #[test]
    fn remove_middle_level_renumbers() {
        let mut commission = ReferralCommission::default();
        let removed = commission.remove_level(1).unwrap();
        assert_eq!(removed.description, "Second Level");
        assert_eq!(commission.levels.len(), 2);
        assert_eq!(commission.levels[0].level, 1);
        assert_eq!(commission.levels[0].description, "Direct Referral");
        assert!(approx_eq(commission.levels[0].rate, 10.0));
        assert_eq!(commission.levels[1].level, 2);
        assert_eq!(commission.levels[1].description, "Third Level");
        assert!(approx_eq(commission.levels[1].rate, 2.0));
    }

    #[test]
    fn last_level_cannot_be_removed() {
        let mut commission = ReferralCommission::default();
        commission.remove_level(0).unwrap();
        commission.remove_level(0).unwrap();
        let before = commission.levels.clone();
        assert_eq!(commission.remove_level(0), Err(LevelRemovalError::LastLevel));
        assert_eq!(commission.levels, before);
        assert_eq!(
            LevelRemovalError::LastLevel.to_string(),
            "At least one commission level is required!"
        );
    }

    #[test]
    fn out_of_range_removal_leaves_levels() {
        let mut commission = ReferralCommission::default();
        assert_eq!(commission.remove_level(7), Err(LevelRemovalError::OutOfRange(7)));
        assert_eq!(commission.levels.len(), 3);
    }

    #[test]
    fn level_edits_ignore_bad_index() {
        let mut commission = ReferralCommission::default();
        assert!(!commission.set_level_rate(5, "3"));
        assert!(!commission.set_level_description(5, "nope"));
        assert!(commission.set_level_description(2, "Deep"));
        assert_eq!(commission.levels[2].description, "Deep");
        assert!(!commission.set_level_rate(2, "101"));
        assert!(approx_eq(commission.levels[2].rate, 2.0));
    }

    fn merged(json: serde_json::Value) -> ReferralCommission {
        match json {
            serde_json::Value::Object(fields) => {
                ReferralCommission::merge_fields(&fields).normalized()
            }
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn unknown_stored_currency_falls_back() {
        let commission = merged(serde_json::json!({ "currency": "DOGE", "commissionRate": 7 }));
        assert_eq!(commission.currency, Currency::Usdt);
        assert!(approx_eq(commission.commission_rate, 7.0));
        assert_eq!(commission.levels.len(), 3);
    }

    #[test]
    fn mistyped_stored_field_keeps_siblings() {
        let commission = merged(serde_json::json!({
            "enabled": true,
            "commissionRate": 25,
            "minWithdrawal": "50",
            "currency": "EUR",
            "levels": [
                { "level": -3, "rate": 20, "description": "Tier A" },
                { "level": 2, "rate": "high", "description": "Tier B" }
            ]
        }));
        assert!(commission.enabled);
        assert!(approx_eq(commission.commission_rate, 25.0));
        assert!(approx_eq(commission.min_withdrawal, 10.0));
        assert_eq!(commission.currency, Currency::Eur);
        assert_eq!(commission.levels.len(), 2);
        assert_eq!(commission.levels[0].level, 1);
        assert!(approx_eq(commission.levels[0].rate, 20.0));
        assert_eq!(commission.levels[0].description, "Tier A");
        assert!(approx_eq(commission.levels[1].rate, 1.0));
        assert_eq!(commission.levels[1].description, "Tier B");
    }

    #[test]
    fn normalized_restores_level_invariants() {
        let stored = ReferralCommission {
            levels: Vec::new(),
            ..Default::default()
        };
        assert_eq!(stored.normalized().levels, default_levels());

        let stored = ReferralCommission {
            levels: vec![
                CommissionLevel {
                    level: 4,
                    rate: 3.0,
                    description: "a".into(),
                },
                CommissionLevel {
                    level: 9,
                    rate: 1.0,
                    description: "b".into(),
                },
            ],
            ..Default::default()
        };
        let normalized = stored.normalized();
        assert!(levels_are_contiguous(&normalized));
        assert_eq!(normalized.levels[1].description, "b");
    }

    proptest! {
        #[test]
        fn prop_rate_edit_applies_only_in_range(value in -500.0f64..500.0) {
            let mut commission = ReferralCommission::default();
            let accepted = commission.set_commission_rate(&value.to_string());
            if (0.0..=100.0).contains(&value) {
                prop_assert!(accepted);
                prop_assert_eq!(commission.commission_rate, value);
            } else {
                prop_assert!(!accepted);
                prop_assert_eq!(commission.commission_rate, 10.0);
            }
        }

        #[test]
        fn prop_level_rate_edit_applies_only_in_range(
            value in -500.0f64..500.0,
            index in 0usize..3,
        ) {
            let mut commission = ReferralCommission::default();
            let before = commission.levels[index].rate;
            commission.set_level_rate(index, &value.to_string());
            let expected = if (0.0..=100.0).contains(&value) { value } else { before };
            prop_assert_eq!(commission.levels[index].rate, expected);
        }

        #[test]
        fn prop_withdrawal_rejects_negatives(value in -1_000.0f64..1_000.0) {
            let mut commission = ReferralCommission::default();
            commission.set_min_withdrawal(&value.to_string());
            let expected = if value >= 0.0 { value } else { 10.0 };
            prop_assert_eq!(commission.min_withdrawal, expected);
        }

        #[test]
        fn prop_levels_stay_contiguous(
            ops in proptest::collection::vec((any::<bool>(), 0usize..8), 0..40),
        ) {
            let mut commission = ReferralCommission::default();
            for (add, index) in ops {
                if add {
                    commission.add_level();
                } else {
                    let _ = commission.remove_level(index);
                }
                prop_assert!(!commission.levels.is_empty());
                prop_assert!(levels_are_contiguous(&commission));
            }
        }
    }
}
