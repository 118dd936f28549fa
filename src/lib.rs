//! Brewhall - tick-driven intoxication simulation
//!
//! Subjects drink, accumulate alcohol, burn it off over time and suffer
//! tiered effects; drinks may also schedule delayed effects and timed
//! attribute modifiers.

pub mod core;
pub mod drink;
pub mod ecs;
pub mod entity;
pub mod rules;
pub mod simulation;
