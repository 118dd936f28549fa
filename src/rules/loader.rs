//! Load drink rules from TOML files

use crate::core::error::Result;
use crate::rules::drink_rules::DrinkRules;
use std::fs;
use std::path::Path;

/// Load and validate drink rules from a TOML file
pub fn load_drink_rules(path: &Path) -> Result<DrinkRules> {
    let content = fs::read_to_string(path)?;
    let rules = parse_drink_rules(&content)?;
    tracing::debug!(
        "Loaded drink rules from {}: {} tiers, multiplier {}",
        path.display(),
        rules.tiers.len(),
        rules.alcohol_multiplier
    );
    Ok(rules)
}

/// Parse and validate drink rules from TOML text
pub fn parse_drink_rules(content: &str) -> Result<DrinkRules> {
    let rules: DrinkRules = toml::from_str(content)?;
    rules.validate()?;
    Ok(rules)
}
