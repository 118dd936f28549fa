//! Subject archetype with SoA layout

use crate::core::types::EntityId;
use crate::drink::intoxication::IntoxicationState;
use crate::entity::body::Body;

/// Structure of Arrays for drinking subjects
///
/// Intoxication state is created lazily on first access and dropped with
/// the subject.
pub struct SubjectArchetype {
    pub ids: Vec<EntityId>,
    pub names: Vec<String>,
    pub bodies: Vec<Body>,
    pub intoxication: Vec<Option<IntoxicationState>>,
    pub alive: Vec<bool>,
}

impl SubjectArchetype {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            names: Vec::new(),
            bodies: Vec::new(),
            intoxication: Vec::new(),
            alive: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn spawn(&mut self, id: EntityId, name: String) {
        self.ids.push(id);
        self.names.push(name);
        self.bodies.push(Body::new());
        self.intoxication.push(None);
        self.alive.push(true);
    }

    pub fn iter_living(&self) -> impl Iterator<Item = usize> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(i, _)| i)
    }

    /// State for the subject at `idx`, created on first access
    pub fn intoxication_mut(&mut self, idx: usize) -> &mut IntoxicationState {
        self.intoxication[idx].get_or_insert_with(IntoxicationState::new)
    }

    /// Mark dead and destroy the subject's intoxication state
    pub fn kill(&mut self, idx: usize) {
        self.alive[idx] = false;
        self.intoxication[idx] = None;
    }
}

impl Default for SubjectArchetype {
    fn default() -> Self {
        Self::new()
    }
}
