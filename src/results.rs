//! Results derivations
//!
//! Presentation values for the voting dashboard, computed as pure functions
//! of an [`ElectionConfig`]: one bar per option, per-item vote totals, and
//! the integer y-axis ticks spanning `0..=max(count, 1)`. Nothing here is
//! cached; callers recompute whenever the configuration changes.

use serde::Serialize;

use crate::store::{ElectionConfig, VotingItem};

/// One bar in a per-item chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionBar {
    pub option_id: String,
    pub label: String,
    pub votes: u64,
}

/// Chart-ready results for a single voting item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResult {
    pub item_id: String,
    pub question: String,
    /// Sum of all option counts for this item.
    pub total_votes: u64,
    /// Bars in option insertion order.
    pub bars: Vec<OptionBar>,
    /// Integer ticks `0..=max(count, 1)`.
    pub y_axis_ticks: Vec<u64>,
}

/// Total votes recorded for one item.
pub fn total_votes(item: &VotingItem) -> u64 {
    item.options.iter().map(|o| o.count).sum()
}

/// Y-axis ticks for one item's chart: `0..=max(count, 1)`, so an item with
/// no votes still renders a 0..1 axis.
pub fn y_axis_ticks(item: &VotingItem) -> Vec<u64> {
    let max = item.options.iter().map(|o| o.count).max().unwrap_or(0).max(1);
    (0..=max).collect()
}

/// Derive chart-ready results for one item.
pub fn item_result(item: &VotingItem) -> ItemResult {
    ItemResult {
        item_id: item.id.clone(),
        question: item.question.clone(),
        total_votes: total_votes(item),
        bars: item
            .options
            .iter()
            .map(|option| OptionBar {
                option_id: option.id.clone(),
                label: option.label.clone(),
                votes: option.count,
            })
            .collect(),
        y_axis_ticks: y_axis_ticks(item),
    }
}

/// Derive results for every item in the election, in display order.
pub fn election_results(config: &ElectionConfig) -> Vec<ItemResult> {
    config.voting_items.iter().map(item_result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::VotingOption;

    fn item_with_counts(counts: &[u64]) -> VotingItem {
        VotingItem {
            id: "item-1".to_string(),
            question: "Approve?".to_string(),
            options: counts
                .iter()
                .enumerate()
                .map(|(i, &count)| VotingOption {
                    id: format!("opt-{}", i),
                    label: format!("Option {}", i),
                    count,
                })
                .collect(),
        }
    }

    #[test]
    fn test_total_votes() {
        assert_eq!(total_votes(&item_with_counts(&[1, 1, 0])), 2);
        assert_eq!(total_votes(&item_with_counts(&[])), 0);
    }

    #[test]
    fn test_y_axis_ticks_with_no_votes() {
        // Zero counts still produce a 0..1 axis
        assert_eq!(y_axis_ticks(&item_with_counts(&[0, 0])), vec![0, 1]);
        assert_eq!(y_axis_ticks(&item_with_counts(&[])), vec![0, 1]);
    }

    #[test]
    fn test_y_axis_ticks_span_max_count() {
        assert_eq!(y_axis_ticks(&item_with_counts(&[3, 1])), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_bars_preserve_option_order() {
        let result = item_result(&item_with_counts(&[4, 0, 7]));
        let labels: Vec<&str> = result.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Option 0", "Option 1", "Option 2"]);
        assert_eq!(result.bars[2].votes, 7);
        assert_eq!(result.total_votes, 11);
    }

    #[test]
    fn test_election_results_one_entry_per_item() {
        let config = ElectionConfig {
            title: "T".to_string(),
            description: String::new(),
            logo_url: None,
            voting_items: vec![item_with_counts(&[1]), {
                let mut other = item_with_counts(&[2, 2]);
                other.id = "item-2".to_string();
                other
            }],
        };

        let results = election_results(&config);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].item_id, "item-1");
        assert_eq!(results[1].item_id, "item-2");
    }
}
