//! Per-subject intoxication state
//!
//! Accumulates alcohol and a running quality score from drinks, burns the
//! alcohol off over time, fires tier effects from the effective level and
//! drives the two scheduled queues (delayed effects, timed attributes).

use crate::core::config::config;
use crate::core::types::{ItemId, Tick};
use crate::drink::effects::{ConsumptionEffect, EffectTarget};
use crate::drink::schedule::{ExpiringList, ScheduledEntry};
use crate::entity::attributes::{AttributeHost, AttributePair};
use crate::rules::DrinkRules;
use serde::{Deserialize, Serialize};

/// Quality value meaning "nothing drunk yet"
pub const UNSET_QUALITY: f64 = -1.0;

/// Anything the intoxication state can tick against
pub trait Subject: EffectTarget + AttributeHost {
    /// Ticks the subject has been alive; tier rates are keyed on it
    fn age(&self) -> Tick;
}

/// Contextual description of what was drunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkType {
    pub id: String,
    pub name: String,
}

impl DrinkType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A stack of items being eaten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemId,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        Self {
            item: ItemId::new(item),
            count,
        }
    }
}

/// Nutrition data of an edible item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodComponent {
    pub nutrition: u32,
    pub saturation: f32,
}

/// What a single `tick` did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub delayed_fired: usize,
    pub attributes_expired: usize,
    pub tier_effects: usize,
}

impl TickReport {
    pub fn is_quiet(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntoxicationState {
    pub(crate) alcohol_level: f64,
    pub(crate) quality: f64,
    pub(crate) delayed_effects: ExpiringList<ConsumptionEffect>,
    pub(crate) timed_attributes: ExpiringList<AttributePair>,
}

impl Default for IntoxicationState {
    fn default() -> Self {
        Self {
            alcohol_level: 0.0,
            quality: UNSET_QUALITY,
            delayed_effects: ExpiringList::new(),
            timed_attributes: ExpiringList::new(),
        }
    }
}

impl IntoxicationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alcohol_level(&self) -> f64 {
        self.alcohol_level
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// True once anything has been drunk since creation or the last reset
    pub fn has_drunk(&self) -> bool {
        self.quality != UNSET_QUALITY
    }

    pub fn delayed_effects(&self) -> &ExpiringList<ConsumptionEffect> {
        &self.delayed_effects
    }

    pub fn timed_attributes(&self) -> &ExpiringList<AttributePair> {
        &self.timed_attributes
    }

    /// Record a drink.
    ///
    /// The level never ends below this drink's own contribution. Quality is
    /// the unweighted running average `(old + new) / 2`, so earlier drinks
    /// fade geometrically; tier thresholds are tuned against that.
    pub fn drink(
        &mut self,
        drink: &DrinkType,
        quality: f64,
        alcoholic_value: f64,
        rules: &DrinkRules,
    ) {
        let delta = alcoholic_value * rules.alcohol_multiplier;

        self.alcohol_level = (self.alcohol_level + delta).max(delta);
        self.quality = if self.has_drunk() {
            (self.quality + quality) / 2.0
        } else {
            quality
        };

        tracing::debug!(
            "Drank {} (quality {:.2}, +{:.2}): level {:.3}, quality {:.3}",
            drink.id,
            quality,
            delta,
            self.alcohol_level,
            self.quality
        );
    }

    /// Eating soaks up alcohol by the item's removal value.
    ///
    /// Only runs while the level is positive. There is no floor, so a
    /// large removal can leave the level negative.
    pub fn eat(&mut self, stack: &ItemStack, _food: Option<&FoodComponent>, rules: &DrinkRules) {
        if self.alcohol_level > 0.0 {
            self.alcohol_level -= rules.removal_values.get(&stack.item);
        }
    }

    /// Level used for every tier comparison
    pub fn modified_alcohol_level(&self) -> f64 {
        let cfg = config();
        self.alcohol_level - (self.quality - cfg.neutral_quality) * cfg.quality_level_weight
    }

    /// Schedule `effects` to fire once after `ticks` ticks
    pub fn add_delayed_effect(
        &mut self,
        ticks: i32,
        drink_age: f64,
        drink_quality: f64,
        effects: &[ConsumptionEffect],
    ) {
        self.delayed_effects
            .push(ScheduledEntry::new(ticks, drink_age, drink_quality, effects));
    }

    /// Hold `attributes` on the subject for `ticks` ticks
    pub fn add_timed_attributes(
        &mut self,
        ticks: i32,
        drink_age: f64,
        drink_quality: f64,
        attributes: &[AttributePair],
    ) {
        self.timed_attributes
            .push(ScheduledEntry::new(ticks, drink_age, drink_quality, attributes));
    }

    /// Forget everything without firing or removing anything
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance one simulation tick for `subject`.
    ///
    /// Order matters: delayed effects, then timed attributes, then decay
    /// and tier effects. Decay and tiers are skipped entirely while the
    /// level is not positive.
    pub fn tick<S: Subject + ?Sized>(&mut self, subject: &mut S, rules: &DrinkRules) -> TickReport {
        let mut report = TickReport {
            delayed_fired: self.tick_delayed_effects(subject),
            attributes_expired: self.tick_timed_attributes(subject),
            tier_effects: 0,
        };

        if self.alcohol_level > 0.0 {
            self.alcohol_level -= config().decay_per_quality * self.quality;

            let level = self.modified_alcohol_level();
            let age = subject.age();
            for tier in rules.tiers.active(level, age) {
                for effect in &tier.effects {
                    subject.apply_effect(effect, 0.0, self.quality);
                    report.tier_effects += 1;
                }
            }
        }

        report
    }

    fn tick_delayed_effects<S: Subject + ?Sized>(&mut self, subject: &mut S) -> usize {
        self.delayed_effects.advance(
            subject,
            |_, _| {},
            |subject, entry| {
                tracing::debug!(
                    "Delayed drink effects firing ({} effects, age {:.1}, quality {:.2})",
                    entry.payload().len(),
                    entry.age,
                    entry.quality
                );
                for effect in entry.payload() {
                    subject.apply_effect(effect, entry.age, entry.quality);
                }
            },
        )
    }

    fn tick_timed_attributes<S: Subject + ?Sized>(&mut self, subject: &mut S) -> usize {
        self.timed_attributes.advance(
            subject,
            |subject, entry| {
                for pair in entry.payload() {
                    if subject.has_attribute(pair.attribute)
                        && !subject.has_modifier(pair.attribute, pair.modifier.id)
                    {
                        subject.add_modifier(pair.attribute, &pair.modifier);
                    }
                }
            },
            |subject, entry| {
                for pair in entry.payload() {
                    if subject.has_modifier(pair.attribute, pair.modifier.id) {
                        subject.remove_modifier(pair.attribute, &pair.modifier);
                    }
                }
                tracing::debug!("Timed attributes expired ({} modifiers)", entry.payload().len());
            },
        )
    }
}
