//! Subject attributes and the modifiers drinks attach to them

use crate::core::types::ModifierId;
use serde::{Deserialize, Serialize};

/// Attributes a subject may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    MaxHealth,
    MovementSpeed,
    AttackDamage,
    AttackSpeed,
    Armor,
    Luck,
}

/// How a modifier combines with the attribute's base value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierOperation {
    /// base + amount
    AddValue,
    /// + base * amount
    AddMultipliedBase,
    /// total * (1 + amount)
    AddMultipliedTotal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeModifier {
    pub id: ModifierId,
    pub amount: f64,
    pub operation: ModifierOperation,
}

impl AttributeModifier {
    pub fn new(amount: f64, operation: ModifierOperation) -> Self {
        Self {
            id: ModifierId::new(),
            amount,
            operation,
        }
    }
}

/// One scheduled (attribute, modifier) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributePair {
    pub attribute: AttributeKey,
    pub modifier: AttributeModifier,
}

impl AttributePair {
    pub fn new(attribute: AttributeKey, modifier: AttributeModifier) -> Self {
        Self { attribute, modifier }
    }
}

/// A live attribute on a subject: base value plus attached modifiers
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeInstance {
    pub base: f64,
    modifiers: Vec<AttributeModifier>,
}

impl AttributeInstance {
    pub fn new(base: f64) -> Self {
        Self {
            base,
            modifiers: Vec::new(),
        }
    }

    pub fn has_modifier(&self, id: ModifierId) -> bool {
        self.modifiers.iter().any(|m| m.id == id)
    }

    /// Attach a modifier; a modifier with the same id is replaced
    pub fn add_modifier(&mut self, modifier: AttributeModifier) {
        self.remove_modifier(modifier.id);
        self.modifiers.push(modifier);
    }

    pub fn remove_modifier(&mut self, id: ModifierId) -> bool {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.id != id);
        self.modifiers.len() != before
    }

    pub fn modifiers(&self) -> &[AttributeModifier] {
        &self.modifiers
    }

    /// Effective value with every modifier folded in
    pub fn value(&self) -> f64 {
        let mut value = self.base;
        for m in self.by_operation(ModifierOperation::AddValue) {
            value += m.amount;
        }

        let mut total = value;
        for m in self.by_operation(ModifierOperation::AddMultipliedBase) {
            total += value * m.amount;
        }
        for m in self.by_operation(ModifierOperation::AddMultipliedTotal) {
            total *= 1.0 + m.amount;
        }
        total
    }

    fn by_operation(
        &self,
        operation: ModifierOperation,
    ) -> impl Iterator<Item = &AttributeModifier> + '_ {
        self.modifiers.iter().filter(move |m| m.operation == operation)
    }
}

/// Capability to attach and detach attribute modifiers on a subject
///
/// Every method tolerates a missing attribute instance: checks report
/// false and mutations do nothing.
pub trait AttributeHost {
    fn has_attribute(&self, key: AttributeKey) -> bool;

    fn has_modifier(&self, key: AttributeKey, id: ModifierId) -> bool;

    fn add_modifier(&mut self, key: AttributeKey, modifier: &AttributeModifier);

    fn remove_modifier(&mut self, key: AttributeKey, modifier: &AttributeModifier);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_without_modifiers() {
        assert_eq!(AttributeInstance::new(0.1).value(), 0.1);
    }

    #[test]
    fn test_value_folds_operations_in_order() {
        let mut speed = AttributeInstance::new(10.0);
        speed.add_modifier(AttributeModifier::new(2.0, ModifierOperation::AddValue));
        speed.add_modifier(AttributeModifier::new(0.5, ModifierOperation::AddMultipliedBase));
        speed.add_modifier(AttributeModifier::new(1.0, ModifierOperation::AddMultipliedTotal));
        // (12 + 12 * 0.5) * 2
        assert!((speed.value() - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_add_same_id_replaces() {
        let mut armor = AttributeInstance::new(0.0);
        let mut modifier = AttributeModifier::new(1.0, ModifierOperation::AddValue);
        armor.add_modifier(modifier.clone());
        modifier.amount = 3.0;
        armor.add_modifier(modifier.clone());

        assert_eq!(armor.modifiers().len(), 1);
        assert_eq!(armor.value(), 3.0);
    }

    #[test]
    fn test_remove_modifier() {
        let mut luck = AttributeInstance::new(0.0);
        let modifier = AttributeModifier::new(-1.0, ModifierOperation::AddValue);
        luck.add_modifier(modifier.clone());

        assert!(luck.has_modifier(modifier.id));
        assert!(luck.remove_modifier(modifier.id));
        assert!(!luck.has_modifier(modifier.id));
        assert!(!luck.remove_modifier(modifier.id));
    }

    #[test]
    fn test_unknown_attribute_key_fails_to_decode() {
        let result: Result<AttributeKey, _> = serde_json::from_str("\"flight_speed\"");
        assert!(result.is_err());
    }
}
