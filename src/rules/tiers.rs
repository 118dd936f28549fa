//! Effect tier definitions and storage

use crate::core::types::Tick;
use crate::drink::effects::ConsumptionEffect;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

/// A threshold rule evaluated against the effective alcohol level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectTier {
    /// Tier applies once the effective level reaches this value
    pub minimum_value: f64,
    /// Apply every `rate` ticks of subject age
    pub rate: NonZeroU64,
    #[serde(default)]
    pub effects: Vec<ConsumptionEffect>,
}

impl EffectTier {
    pub fn new(minimum_value: f64, rate: NonZeroU64, effects: Vec<ConsumptionEffect>) -> Self {
        Self {
            minimum_value,
            rate,
            effects,
        }
    }

    /// Whether this tier fires for `level` on a subject of age `age`
    pub fn applies(&self, level: f64, age: Tick) -> bool {
        level >= self.minimum_value && age % self.rate.get() == 0
    }
}

/// Ordered list of effect tiers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable {
    tiers: Vec<EffectTier>,
}

impl TierTable {
    pub fn new(tiers: Vec<EffectTier>) -> Self {
        Self { tiers }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectTier> {
        self.tiers.iter()
    }

    /// Tiers that fire this tick, in table order
    pub fn active(&self, level: f64, age: Tick) -> impl Iterator<Item = &EffectTier> {
        self.tiers.iter().filter(move |t| t.applies(level, age))
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
