//! World-scoped drink rules

use crate::core::error::{BrewError, Result};
use crate::core::types::ItemId;
use crate::drink::effects::ConsumptionEffect;
use crate::rules::tiers::{EffectTier, TierTable};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

/// How much alcohol eating one item of a type removes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemovalTable {
    values: AHashMap<ItemId, f64>,
}

impl RemovalTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: ItemId, value: f64) {
        self.values.insert(item, value);
    }

    /// Removal value for `item`, 0 for items not in the table
    pub fn get(&self, item: &ItemId) -> f64 {
        self.values.get(item).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, f64)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }
}

/// Read-only inputs the intoxication state machine consults every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkRules {
    /// Scales every drink's alcoholic value
    #[serde(default = "default_multiplier")]
    pub alcohol_multiplier: f64,
    #[serde(default)]
    pub tiers: TierTable,
    #[serde(default)]
    pub removal_values: RemovalTable,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Default for DrinkRules {
    /// Built-in tier ladder, mirrored by `data/drink_rules.toml`
    fn default() -> Self {
        let rate = |n: u64| NonZeroU64::new(n).unwrap_or(NonZeroU64::MIN);

        let tiers = TierTable::new(vec![
            EffectTier::new(
                40.0,
                rate(200),
                vec![ConsumptionEffect::status("nausea", 120, 0)],
            ),
            EffectTier::new(
                70.0,
                rate(100),
                vec![
                    ConsumptionEffect::status("slowness", 100, 1),
                    ConsumptionEffect::status("nausea", 160, 1),
                ],
            ),
            EffectTier::new(
                100.0,
                rate(40),
                vec![
                    ConsumptionEffect::status("blindness", 60, 0),
                    ConsumptionEffect::Damage { amount: 1.0 },
                ],
            ),
        ]);

        let mut removal_values = RemovalTable::new();
        removal_values.insert(ItemId::new("bread"), 4.0);
        removal_values.insert(ItemId::new("baked_potato"), 3.0);
        removal_values.insert(ItemId::new("cookie"), 1.0);
        removal_values.insert(ItemId::new("milk_bucket"), 20.0);

        Self {
            alcohol_multiplier: 1.0,
            tiers,
            removal_values,
        }
    }
}

impl DrinkRules {
    /// Rules with no tiers and no removal values
    pub fn empty() -> Self {
        Self {
            alcohol_multiplier: 1.0,
            tiers: TierTable::default(),
            removal_values: RemovalTable::default(),
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.alcohol_multiplier = multiplier;
        self
    }

    /// Validate rules for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !self.alcohol_multiplier.is_finite() || self.alcohol_multiplier < 0.0 {
            return Err(BrewError::InvalidRules(format!(
                "alcohol_multiplier ({}) must be finite and non-negative",
                self.alcohol_multiplier
            )));
        }

        for (i, tier) in self.tiers.iter().enumerate() {
            if !tier.minimum_value.is_finite() {
                return Err(BrewError::InvalidRules(format!(
                    "tier {} has non-finite minimum_value",
                    i
                )));
            }
        }

        if let Some((item, value)) = self.removal_values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(BrewError::InvalidRules(format!(
                "removal value for {} is not finite ({})",
                item, value
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_item_removes_nothing() {
        let rules = DrinkRules::default();
        assert_eq!(rules.removal_values.get(&ItemId::new("golden_carrot")), 0.0);
        assert_eq!(rules.removal_values.get(&ItemId::new("bread")), 4.0);
    }

    #[test]
    fn test_default_rules_are_valid() {
        assert!(DrinkRules::default().validate().is_ok());
        assert!(DrinkRules::empty().validate().is_ok());
    }

    #[test]
    fn test_negative_multiplier_rejected() {
        let rules = DrinkRules::empty().with_multiplier(-2.0);
        assert!(matches!(rules.validate(), Err(BrewError::InvalidRules(_))));
    }

    #[test]
    fn test_non_finite_removal_value_rejected() {
        let mut rules = DrinkRules::empty();
        rules.removal_values.insert(ItemId::new("bread"), f64::NAN);
        assert!(rules.validate().is_err());
    }
}
