//! Election data model
//!
//! The persisted aggregate is a single [`ElectionConfig`] owning an ordered
//! list of [`VotingItem`]s, each owning an ordered list of [`VotingOption`]s.
//! Serialized field names keep the camelCase layout of the storage format.
//!
//! Recorded tallies are stored separately as a [`TallyMap`]: item id to
//! (option id to count). Items or options absent from the tally map keep the
//! counts embedded in the configuration blob.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::store::error::{StoreError, StoreResult};

/// One selectable answer to a voting item, with its running vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingOption {
    /// Opaque identifier, assigned once at creation.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Number of votes recorded for this option.
    #[serde(default)]
    pub count: u64,
}

/// One question with a fixed set of mutually exclusive options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingItem {
    /// Opaque identifier, unique within the configuration.
    pub id: String,
    /// Question text.
    pub question: String,
    /// Options in display order; ids unique within the item.
    pub options: Vec<VotingOption>,
}

/// The aggregate root: a single election configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionConfig {
    /// Election title shown on the kiosk.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Optional logo as a data URI.
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Voting items in display order; ids unique within the configuration.
    pub voting_items: Vec<VotingItem>,
}

/// Separately persisted vote counts: item id -> (option id -> count).
pub type TallyMap = HashMap<String, HashMap<String, u64>>;

impl ElectionConfig {
    /// Decode a persisted configuration blob.
    ///
    /// Either produces a well-typed aggregate or an error; callers treat the
    /// error as "no valid data". Beyond JSON well-formedness, ids must be
    /// unique within their enclosing collection. Items without options are
    /// accepted here; that invariant belongs to the builder, not the store.
    pub fn decode(raw: &str) -> StoreResult<Self> {
        let config: ElectionConfig = serde_json::from_str(raw)?;
        config.validate_ids()?;
        Ok(config)
    }

    /// Check id uniqueness within each collection.
    fn validate_ids(&self) -> StoreResult<()> {
        let mut item_ids = HashSet::new();
        for item in &self.voting_items {
            if !item_ids.insert(item.id.as_str()) {
                return Err(StoreError::InvalidConfig(format!(
                    "duplicate voting item id '{}'",
                    item.id
                )));
            }

            let mut option_ids = HashSet::new();
            for option in &item.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(StoreError::InvalidConfig(format!(
                        "duplicate option id '{}' in item '{}'",
                        option.id, item.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Return a copy of this configuration with every count coerced to 0.
    pub fn with_zeroed_counts(&self) -> Self {
        let mut reset = self.clone();
        for item in &mut reset.voting_items {
            for option in &mut item.options {
                option.count = 0;
            }
        }
        reset
    }

    /// Overlay stored tallies onto this configuration.
    ///
    /// Only (item id, option id) pairs present in both the configuration and
    /// the tally map are overwritten; everything else keeps its embedded
    /// count. Tally entries for unknown ids are ignored.
    pub fn apply_tallies(&mut self, tallies: &TallyMap) {
        for item in &mut self.voting_items {
            if let Some(counts) = tallies.get(&item.id) {
                for option in &mut item.options {
                    if let Some(&count) = counts.get(&option.id) {
                        option.count = count;
                    }
                }
            }
        }
    }

    /// Extract the current counts as a tally map.
    pub fn tally_map(&self) -> TallyMap {
        self.voting_items
            .iter()
            .map(|item| {
                let counts = item
                    .options
                    .iter()
                    .map(|option| (option.id.clone(), option.count))
                    .collect();
                (item.id.clone(), counts)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> ElectionConfig {
        ElectionConfig {
            title: "Assembly".to_string(),
            description: "Annual general assembly".to_string(),
            logo_url: None,
            voting_items: vec![VotingItem {
                id: "item-1".to_string(),
                question: "Approve?".to_string(),
                options: vec![
                    VotingOption {
                        id: "opt-si".to_string(),
                        label: "SI".to_string(),
                        count: 0,
                    },
                    VotingOption {
                        id: "opt-no".to_string(),
                        label: "NO".to_string(),
                        count: 2,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_string(&sample_config()).unwrap();
        assert!(json.contains("\"votingItems\""));
        assert!(json.contains("\"logoUrl\""));
        assert!(json.contains("\"question\""));
        assert!(!json.contains("voting_items"));
    }

    #[test]
    fn test_decode_round_trip() {
        let config = sample_config();
        let json = serde_json::to_string(&config).unwrap();
        let decoded = ElectionConfig::decode(&json).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_decode_missing_count_defaults_to_zero() {
        let raw = r#"{
            "title": "T",
            "description": "",
            "logoUrl": null,
            "votingItems": [
                {"id": "i", "question": "Q", "options": [{"id": "o", "label": "A"}]}
            ]
        }"#;
        let decoded = ElectionConfig::decode(raw).unwrap();
        assert_eq!(decoded.voting_items[0].options[0].count, 0);
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(
            ElectionConfig::decode("{not json"),
            Err(StoreError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_duplicate_item_ids_rejected() {
        let raw = r#"{
            "title": "T",
            "votingItems": [
                {"id": "dup", "question": "A", "options": []},
                {"id": "dup", "question": "B", "options": []}
            ]
        }"#;
        assert!(matches!(
            ElectionConfig::decode(raw),
            Err(StoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_decode_duplicate_option_ids_rejected() {
        let raw = r#"{
            "title": "T",
            "votingItems": [
                {"id": "i", "question": "Q", "options": [
                    {"id": "dup", "label": "A"},
                    {"id": "dup", "label": "B"}
                ]}
            ]
        }"#;
        assert!(matches!(
            ElectionConfig::decode(raw),
            Err(StoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_with_zeroed_counts() {
        let reset = sample_config().with_zeroed_counts();
        for item in &reset.voting_items {
            for option in &item.options {
                assert_eq!(option.count, 0);
            }
        }
    }

    #[test]
    fn test_apply_tallies_overwrites_matching_pairs() {
        let mut config = sample_config().with_zeroed_counts();
        let mut tallies = TallyMap::new();
        tallies.insert(
            "item-1".to_string(),
            HashMap::from([("opt-si".to_string(), 5u64)]),
        );

        config.apply_tallies(&tallies);

        assert_eq!(config.voting_items[0].options[0].count, 5);
        // opt-no absent from the tally map keeps its embedded count
        assert_eq!(config.voting_items[0].options[1].count, 0);
    }

    #[test]
    fn test_apply_tallies_ignores_unknown_ids() {
        let mut config = sample_config();
        let mut tallies = TallyMap::new();
        tallies.insert(
            "no-such-item".to_string(),
            HashMap::from([("x".to_string(), 9u64)]),
        );
        tallies.insert(
            "item-1".to_string(),
            HashMap::from([("no-such-option".to_string(), 9u64)]),
        );

        let before = config.clone();
        config.apply_tallies(&tallies);
        assert_eq!(config, before);
    }

    #[test]
    fn test_tally_map_extraction() {
        let tallies = sample_config().tally_map();
        assert_eq!(tallies["item-1"]["opt-no"], 2);
        assert_eq!(tallies["item-1"]["opt-si"], 0);
    }
}
