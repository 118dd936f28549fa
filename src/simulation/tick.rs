//! Tick system - advances every subject one step
//!
//! Per living subject: intoxication tick (queues, decay, tiers), status
//! countdown, ageing, death check. Subjects share nothing but the
//! read-only drink rules, so large populations are ticked with rayon.

use crate::core::config::config;
use crate::core::types::Tick;
use crate::drink::intoxication::{IntoxicationState, TickReport};
use crate::ecs::world::World;
use crate::entity::body::Body;
use crate::rules::DrinkRules;
use rayon::prelude::*;

/// Events generated during simulation tick
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// Scheduled effects fired or intoxication tiers applied
    IntoxicationActivity {
        entity_name: String,
        entity_idx: usize,
        tick: Tick,
        report: TickReport,
    },
    /// A subject's health reached zero
    SubjectDied {
        entity_name: String,
        entity_idx: usize,
        tick: Tick,
    },
}

/// Run a single simulation tick
pub fn run_simulation_tick(world: &mut World) -> Vec<SimulationEvent> {
    let tick = world.current_tick;
    let parallel = world.subjects.count() >= config().parallel_threshold;

    let reports = tick_subjects(
        &mut world.subjects.bodies,
        &mut world.subjects.intoxication,
        &world.subjects.alive,
        &world.rules,
        parallel,
    );

    let mut events = Vec::new();
    for (idx, report) in reports.into_iter().enumerate() {
        let Some(report) = report else { continue };

        if !report.is_quiet() {
            tracing::debug!(
                "{} tick {}: {} delayed fired, {} attribute sets expired, {} tier effects",
                world.subjects.names[idx],
                tick,
                report.delayed_fired,
                report.attributes_expired,
                report.tier_effects
            );
            events.push(SimulationEvent::IntoxicationActivity {
                entity_name: world.subjects.names[idx].clone(),
                entity_idx: idx,
                tick,
                report,
            });
        }

        if !world.subjects.bodies[idx].is_alive() {
            tracing::info!("{} died at tick {}", world.subjects.names[idx], tick);
            world.subjects.kill(idx);
            events.push(SimulationEvent::SubjectDied {
                entity_name: world.subjects.names[idx].clone(),
                entity_idx: idx,
                tick,
            });
        }
    }

    world.tick();
    events
}

/// Tick every living subject; `None` for dead slots
fn tick_subjects(
    bodies: &mut [Body],
    intoxication: &mut [Option<IntoxicationState>],
    alive: &[bool],
    rules: &DrinkRules,
    parallel: bool,
) -> Vec<Option<TickReport>> {
    if parallel {
        bodies
            .par_iter_mut()
            .zip(intoxication.par_iter_mut())
            .zip(alive.par_iter())
            .map(|((body, state), &alive)| tick_subject(body, state, alive, rules))
            .collect()
    } else {
        bodies
            .iter_mut()
            .zip(intoxication.iter_mut())
            .zip(alive.iter())
            .map(|((body, state), &alive)| tick_subject(body, state, alive, rules))
            .collect()
    }
}

fn tick_subject(
    body: &mut Body,
    state: &mut Option<IntoxicationState>,
    alive: bool,
    rules: &DrinkRules,
) -> Option<TickReport> {
    if !alive {
        return None;
    }

    let report = match state {
        Some(state) => state.tick(body, rules),
        None => TickReport::default(),
    };
    body.tick_statuses();
    body.advance_age();
    Some(report)
}
