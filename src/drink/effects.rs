//! Consumption effects and the capability that applies them

use serde::{Deserialize, Serialize};

/// An effect a drink (or an intoxication tier) applies to its subject
///
/// This is pure data: it is what gets scheduled and persisted. How an
/// effect lands on a subject is up to the subject's `EffectTarget`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsumptionEffect {
    /// Grant or refresh a named status for `duration` ticks
    Status {
        effect: String,
        duration: u32,
        #[serde(default)]
        amplifier: u8,
    },
    /// Lose health
    Damage { amount: f64 },
    /// Regain health
    Heal { amount: f64 },
}

impl ConsumptionEffect {
    pub fn status(effect: impl Into<String>, duration: u32, amplifier: u8) -> Self {
        Self::Status {
            effect: effect.into(),
            duration,
            amplifier,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::Damage { .. } => "damage",
            Self::Heal { .. } => "heal",
        }
    }
}

/// Capability to apply a consumption effect to a subject
///
/// `age` is the age of the drink that produced the effect (0 for tier
/// effects), `quality` the drinker's quality at the time. Implementations
/// must not reach back into the subject's intoxication state.
pub trait EffectTarget {
    fn apply_effect(&mut self, effect: &ConsumptionEffect, age: f64, quality: f64);
}
