//! Drinking: intoxication state, scheduled consequences and persistence

pub mod effects;
pub mod intoxication;
pub mod persistence;
pub mod schedule;

pub use effects::{ConsumptionEffect, EffectTarget};
pub use intoxication::{
    DrinkType, FoodComponent, IntoxicationState, ItemStack, Subject, TickReport, UNSET_QUALITY,
};
pub use schedule::{ExpiringList, ScheduledEntry};
