//! Brewhall - headless tavern simulation
//!
//! Spawns a room of patrons, lets them drink and snack at random for a
//! number of ticks, then prints where everyone ended up.

use brewhall::core::config::{set_config, IntoxicationConfig};
use brewhall::core::error::{BrewError, Result};
use brewhall::core::types::EntityId;
use brewhall::drink::{ConsumptionEffect, DrinkType, FoodComponent, ItemStack};
use brewhall::ecs::World;
use brewhall::entity::attributes::{
    AttributeKey, AttributeModifier, AttributePair, ModifierOperation,
};
use brewhall::rules::{load_drink_rules, DrinkRules};
use brewhall::simulation::{run_simulation_tick, SimulationEvent};
use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Headless tavern simulation
#[derive(Parser, Debug)]
#[command(name = "brewhall")]
#[command(about = "Simulate a tavern full of drinkers tick by tick")]
struct Args {
    /// Drink rules TOML file (built-in rules when omitted)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Number of patrons
    #[arg(long, default_value_t = 8)]
    subjects: usize,

    /// Ticks to simulate
    #[arg(long, default_value_t = 6000)]
    ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Subject count at which ticking switches to parallel
    #[arg(long)]
    parallel_threshold: Option<usize>,

    /// Write a JSON snapshot of every patron's intoxication here
    #[arg(long)]
    save: Option<PathBuf>,
}

/// What the bar serves
struct MenuItem {
    id: &'static str,
    name: &'static str,
    alcoholic_value: f64,
    quality: (f64, f64),
}

const MENU: &[MenuItem] = &[
    MenuItem {
        id: "small_beer",
        name: "Small Beer",
        alcoholic_value: 4.0,
        quality: (3.0, 7.0),
    },
    MenuItem {
        id: "ale",
        name: "Ale",
        alcoholic_value: 8.0,
        quality: (4.0, 9.0),
    },
    MenuItem {
        id: "mead",
        name: "Mead",
        alcoholic_value: 12.0,
        quality: (6.0, 10.0),
    },
    MenuItem {
        id: "rum",
        name: "Rum",
        alcoholic_value: 20.0,
        quality: (2.0, 8.0),
    },
];

const SNACKS: &[&str] = &["bread", "baked_potato", "cookie", "apple"];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("brewhall=info")),
        )
        .init();

    let args = Args::parse();

    if let Some(threshold) = args.parallel_threshold {
        let config = IntoxicationConfig {
            parallel_threshold: threshold,
            ..IntoxicationConfig::default()
        };
        config.validate().map_err(BrewError::InvalidConfig)?;
        if set_config(config).is_err() {
            tracing::warn!("Intoxication config already set; ignoring --parallel-threshold");
        }
    }

    let rules = match &args.rules {
        Some(path) => load_drink_rules(path)?,
        None => DrinkRules::default(),
    };

    let seed = args.seed.unwrap_or_else(|| rand::random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!(
        "Opening the tavern: {} patrons, {} ticks, seed {}",
        args.subjects,
        args.ticks,
        seed
    );

    let mut world = World::with_rules(rules);
    let patrons: Vec<EntityId> = (0..args.subjects)
        .map(|i| world.spawn_subject(format!("Patron {}", i + 1)))
        .collect();

    let mut deaths = 0;
    for _ in 0..args.ticks {
        for &patron in &patrons {
            if !world.is_alive(patron) {
                continue;
            }
            // Roughly one drink every 400 ticks, one snack every 900
            if rng.gen_bool(1.0 / 400.0) {
                order_drink(&mut world, patron, &mut rng)?;
            }
            if rng.gen_bool(1.0 / 900.0) {
                let snack = SNACKS[rng.gen_range(0..SNACKS.len())];
                let food = FoodComponent { nutrition: 4, saturation: 0.5 };
                world.eat(patron, &ItemStack::new(snack, 1), Some(&food))?;
            }
        }

        for event in run_simulation_tick(&mut world) {
            if let SimulationEvent::SubjectDied { .. } = event {
                deaths += 1;
            }
        }
    }

    print_summary(&world, &patrons, deaths);

    if let Some(path) = &args.save {
        let snapshot = world.snapshot()?;
        std::fs::write(path, serde_json::to_vec_pretty(&snapshot)?)?;
        tracing::info!("Snapshot written to {}", path.display());
    }

    Ok(())
}

fn order_drink(world: &mut World, patron: EntityId, rng: &mut ChaCha8Rng) -> Result<()> {
    let item = &MENU[rng.gen_range(0..MENU.len())];
    let quality = rng.gen_range(item.quality.0..=item.quality.1);
    let drink_age: f64 = rng.gen_range(0.0..10.0);
    let drink = DrinkType::new(item.id, item.name);

    world.drink(patron, &drink, quality, item.alcoholic_value)?;

    match item.id {
        // Cheap rum catches up with you later
        "rum" if quality < 5.0 => world.add_delayed_effect(
            patron,
            600,
            drink_age,
            quality,
            &[ConsumptionEffect::status("nausea", 200, 1)],
        )?,
        "mead" => world.add_timed_attributes(
            patron,
            1200,
            drink_age,
            quality,
            &[AttributePair::new(
                AttributeKey::Luck,
                AttributeModifier::new(1.0, ModifierOperation::AddValue),
            )],
        )?,
        "ale" => world.add_timed_attributes(
            patron,
            800,
            drink_age,
            quality,
            &[
                AttributePair::new(
                    AttributeKey::AttackDamage,
                    AttributeModifier::new(0.5, ModifierOperation::AddValue),
                ),
                AttributePair::new(
                    AttributeKey::MovementSpeed,
                    AttributeModifier::new(-0.15, ModifierOperation::AddMultipliedTotal),
                ),
            ],
        )?,
        _ => {}
    }

    Ok(())
}

fn print_summary(world: &World, patrons: &[EntityId], deaths: usize) {
    println!("\n=== BREWHALL: closing time at tick {} ===", world.current_tick);
    println!(
        "{:<12} {:>8} {:>8} {:>10} {:>7} {:>7}  {}",
        "patron", "level", "quality", "effective", "health", "queued", "statuses"
    );

    for &patron in patrons {
        let Some(idx) = world.index_of(patron) else { continue };
        let name = &world.subjects.names[idx];

        if !world.is_alive(patron) {
            println!("{:<12} (passed out for good)", name);
            continue;
        }

        let health = world.body(patron).map(|b| b.health).unwrap_or(0.0);
        let statuses = world
            .body(patron)
            .map(|b| {
                b.statuses()
                    .iter()
                    .map(|s| format!("{}({})", s.effect, s.ticks_left))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        match world.intoxication(patron).filter(|s| s.has_drunk()) {
            Some(state) => println!(
                "{:<12} {:>8.2} {:>8.2} {:>10.2} {:>7.1} {:>7}  {}",
                name,
                state.alcohol_level(),
                state.quality(),
                state.modified_alcohol_level(),
                health,
                state.delayed_effects().len() + state.timed_attributes().len(),
                statuses
            ),
            None => println!("{:<12} {:>8}", name, "sober"),
        }
    }

    println!("\nDeaths: {}", deaths);
}
