//! ECS World - manages all subjects and the drink rules they live under

use crate::core::error::{BrewError, Result};
use crate::core::types::{EntityId, Tick};
use crate::drink::effects::ConsumptionEffect;
use crate::drink::intoxication::{DrinkType, FoodComponent, IntoxicationState, ItemStack};
use crate::entity::attributes::AttributePair;
use crate::entity::body::Body;
use crate::entity::subject::SubjectArchetype;
use crate::rules::DrinkRules;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Persisted intoxication records of every subject that has one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub subjects: Vec<SubjectRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub id: EntityId,
    pub intoxication: serde_json::Value,
}

/// The world containing all subjects
pub struct World {
    pub current_tick: Tick,
    pub rules: DrinkRules,
    entity_registry: AHashMap<EntityId, usize>,
    pub subjects: SubjectArchetype,
}

impl World {
    pub fn new() -> Self {
        Self::with_rules(DrinkRules::default())
    }

    pub fn with_rules(rules: DrinkRules) -> Self {
        Self {
            current_tick: 0,
            rules,
            entity_registry: AHashMap::new(),
            subjects: SubjectArchetype::new(),
        }
    }

    pub fn spawn_subject(&mut self, name: String) -> EntityId {
        let entity_id = EntityId::new();
        self.insert_subject(entity_id, name);
        entity_id
    }

    /// Spawn a subject under an id it already had, e.g. one being loaded
    /// back from a snapshot taken by another world.
    pub fn spawn_subject_with_id(&mut self, entity_id: EntityId, name: String) -> Result<()> {
        if self.entity_registry.contains_key(&entity_id) {
            return Err(BrewError::DuplicateEntity(entity_id));
        }
        self.insert_subject(entity_id, name);
        Ok(())
    }

    fn insert_subject(&mut self, entity_id: EntityId, name: String) {
        let index = self.subjects.count();
        self.subjects.spawn(entity_id, name);
        self.entity_registry.insert(entity_id, index);
    }

    pub fn index_of(&self, entity_id: EntityId) -> Option<usize> {
        self.entity_registry.get(&entity_id).copied()
    }

    fn living_index(&self, entity_id: EntityId) -> Result<usize> {
        self.index_of(entity_id)
            .filter(|&idx| self.subjects.alive[idx])
            .ok_or(BrewError::EntityNotFound(entity_id))
    }

    pub fn entity_count(&self) -> usize {
        self.subjects.count()
    }

    pub fn is_alive(&self, entity_id: EntityId) -> bool {
        self.living_index(entity_id).is_ok()
    }

    /// Remove a subject from play; its intoxication state goes with it
    pub fn despawn(&mut self, entity_id: EntityId) -> Result<()> {
        let idx = self.living_index(entity_id)?;
        self.subjects.kill(idx);
        Ok(())
    }

    /// Intoxication state if the subject has one yet
    pub fn intoxication(&self, entity_id: EntityId) -> Option<&IntoxicationState> {
        let idx = self.index_of(entity_id)?;
        self.subjects.intoxication[idx].as_ref()
    }

    /// Intoxication state, created on first access
    pub fn intoxication_mut(&mut self, entity_id: EntityId) -> Result<&mut IntoxicationState> {
        let idx = self.living_index(entity_id)?;
        Ok(self.subjects.intoxication_mut(idx))
    }

    pub fn body(&self, entity_id: EntityId) -> Option<&Body> {
        let idx = self.index_of(entity_id)?;
        self.subjects.bodies.get(idx)
    }

    pub fn body_mut(&mut self, entity_id: EntityId) -> Option<&mut Body> {
        let idx = self.index_of(entity_id)?;
        self.subjects.bodies.get_mut(idx)
    }

    pub fn drink(
        &mut self,
        entity_id: EntityId,
        drink: &DrinkType,
        quality: f64,
        alcoholic_value: f64,
    ) -> Result<()> {
        let idx = self.living_index(entity_id)?;
        self.subjects
            .intoxication_mut(idx)
            .drink(drink, quality, alcoholic_value, &self.rules);
        Ok(())
    }

    pub fn eat(
        &mut self,
        entity_id: EntityId,
        stack: &ItemStack,
        food: Option<&FoodComponent>,
    ) -> Result<()> {
        let idx = self.living_index(entity_id)?;
        self.subjects
            .intoxication_mut(idx)
            .eat(stack, food, &self.rules);
        Ok(())
    }

    pub fn add_delayed_effect(
        &mut self,
        entity_id: EntityId,
        ticks: i32,
        drink_age: f64,
        drink_quality: f64,
        effects: &[ConsumptionEffect],
    ) -> Result<()> {
        self.intoxication_mut(entity_id)?
            .add_delayed_effect(ticks, drink_age, drink_quality, effects);
        Ok(())
    }

    pub fn add_timed_attributes(
        &mut self,
        entity_id: EntityId,
        ticks: i32,
        drink_age: f64,
        drink_quality: f64,
        attributes: &[AttributePair],
    ) -> Result<()> {
        self.intoxication_mut(entity_id)?
            .add_timed_attributes(ticks, drink_age, drink_quality, attributes);
        Ok(())
    }

    /// Encode every living subject's intoxication state
    pub fn snapshot(&self) -> Result<WorldSnapshot> {
        let mut subjects = Vec::new();
        for idx in self.subjects.iter_living() {
            if let Some(state) = &self.subjects.intoxication[idx] {
                subjects.push(SubjectRecord {
                    id: self.subjects.ids[idx],
                    intoxication: state.to_record()?,
                });
            }
        }
        Ok(WorldSnapshot {
            tick: self.current_tick,
            subjects,
        })
    }

    /// Load intoxication states from a snapshot.
    ///
    /// Records for subjects not alive in this world are skipped.
    /// Returns how many states were restored.
    pub fn restore(&mut self, snapshot: &WorldSnapshot) -> usize {
        let mut restored = 0;
        for record in &snapshot.subjects {
            match self.living_index(record.id) {
                Ok(idx) => {
                    self.subjects
                        .intoxication_mut(idx)
                        .read_record(&record.intoxication);
                    restored += 1;
                }
                Err(_) => {
                    tracing::debug!("Skipping snapshot record for unknown subject {}", record.id);
                }
            }
        }
        restored
    }

    pub fn tick(&mut self) {
        self.current_tick += 1;
    }

    pub fn subject_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.subjects.iter_living().map(|idx| self.subjects.ids[idx])
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
