//! Integration tests for the intoxication lifecycle
//!
//! These tests drive subjects through the world tick loop:
//! - Drinking raises the level, ticking burns it off
//! - Tier effects land on the body once the effective level is high enough
//! - Delayed effects fire once, timed attributes apply then revert
//! - Eating soaks up alcohol

use brewhall::drink::{ConsumptionEffect, DrinkType, ItemStack};
use brewhall::ecs::world::World;
use brewhall::entity::attributes::{
    AttributeHost, AttributeKey, AttributeModifier, AttributePair, ModifierOperation,
};
use brewhall::rules::{DrinkRules, EffectTier, TierTable};
use brewhall::simulation::tick::{run_simulation_tick, SimulationEvent};
use std::num::NonZeroU64;

fn ale() -> DrinkType {
    DrinkType::new("ale", "Ale")
}

// ============================================================================
// Decay and tiers
// ============================================================================

#[test]
fn test_level_burns_off_until_sober() {
    let mut world = World::with_rules(DrinkRules::empty());
    let id = world.spawn_subject("Ada".into());
    world.drink(id, &ale(), 10.0, 1.0).unwrap();

    // 0.012 per tick at quality 10: gone after 84 ticks
    for _ in 0..84 {
        run_simulation_tick(&mut world);
    }
    let level = world.intoxication(id).unwrap().alcohol_level();
    assert!(level <= 0.0, "level should be spent, got {}", level);

    // Once not positive, it stays put
    for _ in 0..20 {
        run_simulation_tick(&mut world);
    }
    assert_eq!(world.intoxication(id).unwrap().alcohol_level(), level);
}

#[test]
fn test_heavy_drinking_triggers_default_tiers() {
    let mut world = World::new();
    let id = world.spawn_subject("Bram".into());

    // Low quality: effective level = 60 + (8 - 3) * 5 = 85 => tiers 40 and 70
    world.drink(id, &ale(), 3.0, 60.0).unwrap();
    run_simulation_tick(&mut world);

    let body = world.body(id).unwrap();
    assert!(body.status("nausea").is_some());
    assert!(body.status("slowness").is_some());
    assert!(body.status("blindness").is_none());
}

#[test]
fn test_tier_rate_follows_subject_age() {
    let rules = DrinkRules {
        tiers: TierTable::new(vec![EffectTier::new(
            0.0,
            NonZeroU64::new(10).unwrap(),
            vec![ConsumptionEffect::Damage { amount: 1.0 }],
        )]),
        ..DrinkRules::empty()
    };
    let mut world = World::with_rules(rules);
    let id = world.spawn_subject("Cass".into());
    world.drink(id, &ale(), 5.0, 50.0).unwrap();

    // Ages 0..=24 see the tier at 0, 10 and 20
    for _ in 0..25 {
        run_simulation_tick(&mut world);
    }
    assert_eq!(world.body(id).unwrap().health, 17.0);
}

#[test]
fn test_eating_sobers_up() {
    let mut world = World::new();
    let id = world.spawn_subject("Dov".into());
    world.drink(id, &ale(), 8.0, 10.0).unwrap();

    world.eat(id, &ItemStack::new("bread", 1), None).unwrap();
    world.eat(id, &ItemStack::new("bread", 1), None).unwrap();
    assert_eq!(world.intoxication(id).unwrap().alcohol_level(), 2.0);

    // Third loaf overshoots below zero; no floor
    world.eat(id, &ItemStack::new("bread", 1), None).unwrap();
    assert_eq!(world.intoxication(id).unwrap().alcohol_level(), -2.0);

    // Already not positive: further eating is ignored
    world.eat(id, &ItemStack::new("bread", 1), None).unwrap();
    assert_eq!(world.intoxication(id).unwrap().alcohol_level(), -2.0);
}

// ============================================================================
// Scheduled consequences
// ============================================================================

#[test]
fn test_delayed_effect_through_world() {
    let mut world = World::with_rules(DrinkRules::empty());
    let id = world.spawn_subject("Eli".into());
    world
        .add_delayed_effect(id, 3, 5.0, 6.0, &[ConsumptionEffect::Damage { amount: 4.0 }])
        .unwrap();

    run_simulation_tick(&mut world);
    run_simulation_tick(&mut world);
    assert_eq!(world.body(id).unwrap().health, 20.0);

    let events = run_simulation_tick(&mut world);
    assert_eq!(world.body(id).unwrap().health, 16.0);
    assert!(events.iter().any(|e| matches!(
        e,
        SimulationEvent::IntoxicationActivity { report, .. } if report.delayed_fired == 1
    )));

    for _ in 0..5 {
        run_simulation_tick(&mut world);
    }
    assert_eq!(world.body(id).unwrap().health, 16.0);
    assert!(world.intoxication(id).unwrap().delayed_effects().is_empty());
}

#[test]
fn test_timed_attributes_apply_and_revert() {
    let mut world = World::with_rules(DrinkRules::empty());
    let id = world.spawn_subject("Fen".into());
    let pair = AttributePair::new(
        AttributeKey::AttackDamage,
        AttributeModifier::new(2.0, ModifierOperation::AddValue),
    );
    world.add_timed_attributes(id, 5, 0.0, 8.0, &[pair.clone()]).unwrap();

    for tick in 1..5 {
        run_simulation_tick(&mut world);
        let body = world.body(id).unwrap();
        assert_eq!(
            body.attribute_value(AttributeKey::AttackDamage),
            Some(3.0),
            "modifier should be active after tick {}",
            tick
        );
        assert_eq!(body.attribute(AttributeKey::AttackDamage).unwrap().modifiers().len(), 1);
    }

    run_simulation_tick(&mut world);
    let body = world.body(id).unwrap();
    assert!(!body.has_modifier(AttributeKey::AttackDamage, pair.modifier.id));
    assert_eq!(body.attribute_value(AttributeKey::AttackDamage), Some(1.0));
    assert!(world.intoxication(id).unwrap().timed_attributes().is_empty());
}

#[test]
fn test_overlapping_timed_attributes_expire_independently() {
    let mut world = World::with_rules(DrinkRules::empty());
    let id = world.spawn_subject("Gil".into());
    let short = AttributePair::new(
        AttributeKey::Luck,
        AttributeModifier::new(1.0, ModifierOperation::AddValue),
    );
    let long = AttributePair::new(
        AttributeKey::Luck,
        AttributeModifier::new(2.0, ModifierOperation::AddValue),
    );
    world.add_timed_attributes(id, 2, 0.0, 8.0, &[short]).unwrap();
    world.add_timed_attributes(id, 4, 0.0, 8.0, &[long]).unwrap();

    run_simulation_tick(&mut world);
    assert_eq!(world.body(id).unwrap().attribute_value(AttributeKey::Luck), Some(3.0));

    run_simulation_tick(&mut world);
    assert_eq!(world.body(id).unwrap().attribute_value(AttributeKey::Luck), Some(2.0));

    run_simulation_tick(&mut world);
    run_simulation_tick(&mut world);
    assert_eq!(world.body(id).unwrap().attribute_value(AttributeKey::Luck), Some(0.0));
}
