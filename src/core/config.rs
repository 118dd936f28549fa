//! Intoxication tuning constants
//!
//! The numbers the state machine runs on are collected here with notes on
//! how they interact. Tier thresholds in the drink rules are tuned against
//! these defaults.

/// Configuration for the intoxication systems
#[derive(Debug, Clone)]
pub struct IntoxicationConfig {
    // === DECAY ===
    /// Alcohol removed per tick for each point of quality
    ///
    /// At the default (0.0012), a quality-10 drinker sheds 0.012 per tick,
    /// so a level of 50 burns off in a little over 4000 ticks.
    /// Higher quality decays faster.
    pub decay_per_quality: f64,

    // === EFFECTIVE LEVEL ===
    /// Quality at which the effective level equals the raw level
    ///
    /// Drinks above this feel milder, drinks below it hit harder.
    pub neutral_quality: f64,

    /// Effective-level shift per point of quality away from neutral
    ///
    /// effective = level - (quality - neutral_quality) * quality_level_weight
    pub quality_level_weight: f64,

    // === PARALLELIZATION ===
    /// Minimum subject count before the world driver ticks in parallel
    ///
    /// Below this threshold, thread overhead exceeds benefits.
    pub parallel_threshold: usize,
}

impl Default for IntoxicationConfig {
    fn default() -> Self {
        Self {
            decay_per_quality: 0.0012,
            neutral_quality: 8.0,
            quality_level_weight: 5.0,
            parallel_threshold: 1000,
        }
    }
}

impl IntoxicationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.decay_per_quality.is_finite() || self.decay_per_quality < 0.0 {
            return Err(format!(
                "decay_per_quality ({}) must be finite and non-negative",
                self.decay_per_quality
            ));
        }

        if !self.neutral_quality.is_finite() || !self.quality_level_weight.is_finite() {
            return Err("neutral_quality and quality_level_weight must be finite".into());
        }

        if self.parallel_threshold == 0 {
            return Err("parallel_threshold must be at least 1".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<IntoxicationConfig> = OnceLock::new();

/// Get the global intoxication config (initializes with defaults if not set)
pub fn config() -> &'static IntoxicationConfig {
    CONFIG.get_or_init(IntoxicationConfig::default)
}

/// Set the global intoxication config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: IntoxicationConfig) -> Result<(), IntoxicationConfig> {
    CONFIG.set(config)
}
