//! Saving and loading intoxication state
//!
//! The stored record is a JSON object with the two scalars and the two
//! queues. Loading is lenient at every level: each of the four fields is
//! read on its own and falls back to its default, an entry that does not
//! decode is dropped, and inside an entry every payload element decodes on
//! its own, so one bad element only costs itself.

use crate::core::error::Result;
use crate::drink::intoxication::{IntoxicationState, UNSET_QUALITY};
use crate::drink::schedule::{ExpiringList, ScheduledEntry};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
struct IntoxicationRecord {
    alcohol_level: f64,
    quality: f64,
    delayed_effects: Vec<Value>,
    timed_attributes: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EntryRecord {
    ticks: i32,
    quality: f64,
    age: f64,
    #[serde(default)]
    entries: Vec<Value>,
}

impl IntoxicationState {
    /// Encode the full state as a structured record
    pub fn to_record(&self) -> Result<Value> {
        let record = IntoxicationRecord {
            alcohol_level: self.alcohol_level,
            quality: self.quality,
            delayed_effects: encode_list(&self.delayed_effects)?,
            timed_attributes: encode_list(&self.timed_attributes)?,
        };
        Ok(serde_json::to_value(record)?)
    }

    /// Decode a record, skipping anything that does not decode
    pub fn from_record(record: &Value) -> Self {
        let mut state = Self::new();
        state.read_record(record);
        state
    }

    /// Replace this state with the contents of `record`.
    ///
    /// A missing or unreadable level loads as 0, a missing or unreadable
    /// quality as unset, and a missing or unreadable queue as empty.
    pub fn read_record(&mut self, record: &Value) {
        if !record.is_object() {
            tracing::debug!("Intoxication record is not an object, starting fresh");
        }
        self.alcohol_level = read_scalar(record, "alcohol_level").unwrap_or(0.0);
        self.quality = read_scalar(record, "quality").unwrap_or(UNSET_QUALITY);
        self.delayed_effects = decode_list(list_field(record, "delayed_effects"));
        self.timed_attributes = decode_list(list_field(record, "timed_attributes"));
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.to_record()?)?)
    }

    /// Only a document that is not JSON at all is an error
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let record: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_record(&record))
    }
}

fn encode_list<P: Serialize>(list: &ExpiringList<P>) -> Result<Vec<Value>> {
    list.iter()
        .map(|entry| -> Result<Value> {
            let entries = entry
                .payload()
                .iter()
                .map(serde_json::to_value)
                .collect::<serde_json::Result<Vec<_>>>()?;
            let record = EntryRecord {
                ticks: entry.ticks_left,
                quality: entry.quality,
                age: entry.age,
                entries,
            };
            Ok(serde_json::to_value(record)?)
        })
        .collect()
}

/// Finite number stored under `key`, if any
fn read_scalar(record: &Value, key: &str) -> Option<f64> {
    let value = record.get(key)?;
    match value.as_f64().filter(|v| v.is_finite()) {
        Some(v) => Some(v),
        None => {
            tracing::debug!("Ignoring unreadable {}: {}", key, value);
            None
        }
    }
}

fn list_field<'a>(record: &'a Value, key: &str) -> &'a [Value] {
    match record.get(key) {
        Some(Value::Array(items)) => items,
        None => &[],
        Some(other) => {
            tracing::debug!("Ignoring unreadable {}: {}", key, other);
            &[]
        }
    }
}

fn decode_list<P: DeserializeOwned>(records: &[Value]) -> ExpiringList<P> {
    let mut list = ExpiringList::new();
    for entry in records.iter().filter_map(decode_entry) {
        list.push(entry);
    }
    list
}

fn decode_entry<P: DeserializeOwned>(value: &Value) -> Option<ScheduledEntry<P>> {
    let record = match EntryRecord::deserialize(value) {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!("Dropping undecodable scheduled entry: {}", e);
            return None;
        }
    };

    let payload: Vec<P> = record
        .entries
        .iter()
        .filter_map(|element| match P::deserialize(element) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!("Dropping undecodable payload element: {}", e);
                None
            }
        })
        .collect();

    Some(ScheduledEntry::from_parts(
        record.ticks,
        record.age,
        record.quality,
        payload,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drink::effects::ConsumptionEffect;
    use crate::drink::intoxication::DrinkType;
    use crate::entity::attributes::{
        AttributeKey, AttributeModifier, AttributePair, ModifierOperation,
    };
    use crate::rules::DrinkRules;
    use serde_json::json;

    fn populated_state() -> IntoxicationState {
        let mut state = IntoxicationState::new();
        state.drink(&DrinkType::new("mead", "Mead"), 7.0, 12.0, &DrinkRules::empty());
        state.add_delayed_effect(
            30,
            4.0,
            7.0,
            &[
                ConsumptionEffect::status("nausea", 100, 1),
                ConsumptionEffect::Damage { amount: 2.0 },
            ],
        );
        state.add_timed_attributes(
            200,
            4.0,
            7.0,
            &[AttributePair::new(
                AttributeKey::AttackDamage,
                AttributeModifier::new(1.5, ModifierOperation::AddValue),
            )],
        );
        state
    }

    #[test]
    fn test_round_trip() {
        let state = populated_state();
        let record = state.to_record().unwrap();
        assert_eq!(IntoxicationState::from_record(&record), state);
    }

    #[test]
    fn test_round_trip_bytes() {
        let state = populated_state();
        let bytes = state.to_bytes().unwrap();
        assert_eq!(IntoxicationState::from_bytes(&bytes).unwrap(), state);
    }

    #[test]
    fn test_queues_stored_separately() {
        let record = populated_state().to_record().unwrap();
        assert_eq!(record["delayed_effects"].as_array().unwrap().len(), 1);
        assert_eq!(record["timed_attributes"].as_array().unwrap().len(), 1);
        assert_eq!(record["delayed_effects"][0]["ticks"], json!(30));
    }

    #[test]
    fn test_fresh_state_round_trip_keeps_unset_quality() {
        let record = IntoxicationState::new().to_record().unwrap();
        let state = IntoxicationState::from_record(&record);
        assert!(!state.has_drunk());
    }

    #[test]
    fn test_bad_payload_element_dropped() {
        let record = json!({
            "alcohol_level": 3.0,
            "quality": 6.0,
            "delayed_effects": [{
                "ticks": 5, "quality": 6.0, "age": 1.0,
                "entries": [
                    {"type": "teleport", "radius": 8},
                    {"type": "heal", "amount": 2.0}
                ]
            }],
            "timed_attributes": [{
                "ticks": 5, "quality": 6.0, "age": 1.0,
                "entries": [
                    {"attribute": "flight_speed", "modifier": {}}
                ]
            }]
        });

        let state = IntoxicationState::from_record(&record);
        assert_eq!(state.alcohol_level(), 3.0);

        let delayed = state.delayed_effects().iter().next().unwrap();
        assert_eq!(delayed.payload(), &[ConsumptionEffect::Heal { amount: 2.0 }]);

        let timed = state.timed_attributes().iter().next().unwrap();
        assert!(timed.payload().is_empty());
    }

    #[test]
    fn test_bad_entry_dropped() {
        let record = json!({
            "alcohol_level": 1.0,
            "quality": 9.0,
            "delayed_effects": [
                {"ticks": "soon", "quality": 6.0, "age": 1.0, "entries": []},
                "garbage",
                {"ticks": 2, "quality": 6.0, "age": 1.0, "entries": []}
            ]
        });

        let state = IntoxicationState::from_record(&record);
        assert_eq!(state.delayed_effects().len(), 1);
        assert!(state.timed_attributes().is_empty());
        assert_eq!(state.quality(), 9.0);
    }

    #[test]
    fn test_non_object_record_loads_fresh() {
        let state = IntoxicationState::from_record(&json!("not a record"));
        assert_eq!(state, IntoxicationState::new());
    }

    #[test]
    fn test_read_record_replaces_queues() {
        let mut state = populated_state();
        state.read_record(&json!({"alcohol_level": 2.0, "quality": 5.0}));
        assert!(state.delayed_effects().is_empty());
        assert!(state.timed_attributes().is_empty());
        assert_eq!(state.alcohol_level(), 2.0);
    }

    #[test]
    fn test_corrupt_queue_field_keeps_the_rest() {
        let mut record = populated_state().to_record().unwrap();
        record["delayed_effects"] = json!({"corrupt": true});

        let state = IntoxicationState::from_record(&record);
        assert_eq!(state.alcohol_level(), 12.0);
        assert_eq!(state.quality(), 7.0);
        assert!(state.delayed_effects().is_empty());
        assert_eq!(state.timed_attributes().len(), 1);
    }

    #[test]
    fn test_corrupt_scalar_falls_back_alone() {
        let mut record = populated_state().to_record().unwrap();
        record["quality"] = json!("x");

        let state = IntoxicationState::from_record(&record);
        assert!(!state.has_drunk());
        assert_eq!(state.alcohol_level(), 12.0);
        assert_eq!(state.delayed_effects().len(), 1);
        assert_eq!(state.timed_attributes().len(), 1);
    }

    #[test]
    fn test_non_finite_level_reloads_as_zero() {
        let mut state = populated_state();
        state.alcohol_level = f64::NAN;

        let record = state.to_record().unwrap();
        assert!(record["alcohol_level"].is_null());

        let reloaded = IntoxicationState::from_record(&record);
        assert_eq!(reloaded.alcohol_level(), 0.0);
        assert_eq!(reloaded.quality(), 7.0);
        assert_eq!(reloaded.timed_attributes().len(), 1);
    }

    #[test]
    fn test_from_bytes_rejects_non_json() {
        assert!(IntoxicationState::from_bytes(b"not json").is_err());
    }
}
