//! Physical body simulation

use crate::core::types::{ModifierId, Tick};
use crate::drink::effects::{ConsumptionEffect, EffectTarget};
use crate::drink::intoxication::Subject;
use crate::entity::attributes::{AttributeHost, AttributeInstance, AttributeKey, AttributeModifier};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A named status with a countdown, e.g. nausea from heavy drinking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub effect: String,
    pub amplifier: u8,
    pub ticks_left: u32,
    /// Quality of the drink (or drinker) that caused it
    pub quality: f64,
}

/// Physical state of a subject's body
#[derive(Debug, Clone)]
pub struct Body {
    /// Ticks alive
    pub age: Tick,
    pub health: f64,
    attributes: AHashMap<AttributeKey, AttributeInstance>,
    statuses: Vec<StatusEffect>,
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}

impl Body {
    /// Body with the standard attribute set at full health
    pub fn new() -> Self {
        let attributes = [
            (AttributeKey::MaxHealth, 20.0),
            (AttributeKey::MovementSpeed, 0.1),
            (AttributeKey::AttackDamage, 1.0),
            (AttributeKey::AttackSpeed, 4.0),
            (AttributeKey::Armor, 0.0),
            (AttributeKey::Luck, 0.0),
        ]
        .into_iter()
        .map(|(key, base)| (key, AttributeInstance::new(base)))
        .collect();

        Self {
            age: 0,
            health: 20.0,
            attributes,
            statuses: Vec::new(),
        }
    }

    /// Body carrying only the given attributes
    pub fn with_attributes(attributes: &[(AttributeKey, f64)]) -> Self {
        Self {
            attributes: attributes
                .iter()
                .map(|&(key, base)| (key, AttributeInstance::new(base)))
                .collect(),
            ..Self::new()
        }
    }

    pub fn attribute(&self, key: AttributeKey) -> Option<&AttributeInstance> {
        self.attributes.get(&key)
    }

    pub fn attribute_value(&self, key: AttributeKey) -> Option<f64> {
        self.attributes.get(&key).map(AttributeInstance::value)
    }

    pub fn max_health(&self) -> f64 {
        self.attribute_value(AttributeKey::MaxHealth).unwrap_or(20.0)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn statuses(&self) -> &[StatusEffect] {
        &self.statuses
    }

    pub fn status(&self, effect: &str) -> Option<&StatusEffect> {
        self.statuses.iter().find(|s| s.effect == effect)
    }

    /// Count statuses down and drop the finished ones
    pub fn tick_statuses(&mut self) {
        for status in &mut self.statuses {
            status.ticks_left = status.ticks_left.saturating_sub(1);
        }
        self.statuses.retain(|s| s.ticks_left > 0);
    }

    /// Age the body by one tick; health above a lowered max is trimmed
    pub fn advance_age(&mut self) {
        self.age += 1;
        self.health = self.health.min(self.max_health());
    }

    fn grant_status(&mut self, effect: &str, duration: u32, amplifier: u8, quality: f64) {
        if duration == 0 {
            return;
        }
        match self.statuses.iter_mut().find(|s| s.effect == effect) {
            Some(existing) => {
                existing.amplifier = existing.amplifier.max(amplifier);
                existing.ticks_left = existing.ticks_left.max(duration);
                existing.quality = quality;
            }
            None => self.statuses.push(StatusEffect {
                effect: effect.to_string(),
                amplifier,
                ticks_left: duration,
                quality,
            }),
        }
    }
}

impl EffectTarget for Body {
    fn apply_effect(&mut self, effect: &ConsumptionEffect, _age: f64, quality: f64) {
        match effect {
            ConsumptionEffect::Status {
                effect,
                duration,
                amplifier,
            } => self.grant_status(effect, *duration, *amplifier, quality),
            ConsumptionEffect::Damage { amount } => {
                self.health = (self.health - amount).max(0.0);
            }
            ConsumptionEffect::Heal { amount } => {
                self.health = (self.health + amount).min(self.max_health());
            }
        }
    }
}

impl AttributeHost for Body {
    fn has_attribute(&self, key: AttributeKey) -> bool {
        self.attributes.contains_key(&key)
    }

    fn has_modifier(&self, key: AttributeKey, id: ModifierId) -> bool {
        self.attributes
            .get(&key)
            .is_some_and(|instance| instance.has_modifier(id))
    }

    fn add_modifier(&mut self, key: AttributeKey, modifier: &AttributeModifier) {
        if let Some(instance) = self.attributes.get_mut(&key) {
            instance.add_modifier(modifier.clone());
        }
    }

    fn remove_modifier(&mut self, key: AttributeKey, modifier: &AttributeModifier) {
        if let Some(instance) = self.attributes.get_mut(&key) {
            instance.remove_modifier(modifier.id);
        }
    }
}

impl Subject for Body {
    fn age(&self) -> Tick {
        self.age
    }
}
