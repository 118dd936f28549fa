//! Drink rules: tier ladder, removal values and the world multiplier

pub mod drink_rules;
pub mod tiers;
mod loader;

pub use drink_rules::{DrinkRules, RemovalTable};
pub use tiers::{EffectTier, TierTable};
pub use loader::{load_drink_rules, parse_drink_rules};
