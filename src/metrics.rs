use indexmap::IndexMap;
use serde::Serialize;

use crate::data::{PoolEntry, ResponseSide, TrialRecord};
use crate::types::{ClassTag, StimulusText};

/// Anything carrying a required response side and a stimulus identity.
pub trait Sided {
    /// Required response side.
    fn side(&self) -> ResponseSide;
    /// Stimulus word.
    fn stimulus(&self) -> &str;
    /// Analysis tag.
    fn class_tag(&self) -> &str;
}

impl Sided for PoolEntry {
    fn side(&self) -> ResponseSide {
        self.side
    }

    fn stimulus(&self) -> &str {
        &self.text
    }

    fn class_tag(&self) -> &str {
        &self.class_tag
    }
}

impl Sided for TrialRecord {
    fn side(&self) -> ResponseSide {
        self.correct_side
    }

    fn stimulus(&self) -> &str {
        &self.stimulus
    }

    fn class_tag(&self) -> &str {
        &self.class_tag
    }
}

/// Left/right totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SideCounts {
    /// Items assigned to the left key.
    pub left: usize,
    /// Items assigned to the right key.
    pub right: usize,
}

impl SideCounts {
    /// Left plus right.
    pub fn total(&self) -> usize {
        self.left + self.right
    }
}

/// Count left- and right-assigned items.
pub fn side_counts<'a, T: Sided + 'a>(items: impl IntoIterator<Item = &'a T>) -> SideCounts {
    let mut counts = SideCounts::default();
    for item in items {
        match item.side() {
            ResponseSide::Left => counts.left += 1,
            ResponseSide::Right => counts.right += 1,
        }
    }
    counts
}

/// Identity of a pool entry for counting purposes.
pub type EntryKey = (StimulusText, ResponseSide, ClassTag);

/// Occurrences per distinct entry, in first-seen order.
pub fn entry_counts<'a, T: Sided + 'a>(
    items: impl IntoIterator<Item = &'a T>,
) -> IndexMap<EntryKey, usize> {
    let mut counts = IndexMap::new();
    for item in items {
        let key = (
            item.stimulus().to_string(),
            item.side(),
            item.class_tag().to_string(),
        );
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Aggregate balance metrics for one generated sequence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BalanceSummary {
    /// Sequence length.
    pub total: usize,
    /// Number of distinct pool entries that appeared.
    pub distinct_entries: usize,
    /// Fewest occurrences of any appearing entry.
    pub min: usize,
    /// Most occurrences of any entry.
    pub max: usize,
    /// `max / min`.
    pub ratio: f64,
    /// Left/right split.
    pub sides: SideCounts,
    /// Fraction of items on the left.
    pub left_share: f64,
}

/// Compute balance metrics; `None` for an empty sequence.
pub fn balance_summary<'a, T: Sided + 'a>(
    items: impl IntoIterator<Item = &'a T> + Clone,
) -> Option<BalanceSummary> {
    let counts = entry_counts(items.clone());
    if counts.is_empty() {
        return None;
    }
    let sides = side_counts(items);
    let min = counts.values().copied().min().unwrap_or(0);
    let max = counts.values().copied().max().unwrap_or(0);
    let total = sides.total();
    Some(BalanceSummary {
        total,
        distinct_entries: counts.len(),
        min,
        max,
        ratio: if min == 0 {
            f64::INFINITY
        } else {
            max as f64 / min as f64
        },
        sides,
        left_share: sides.left as f64 / total as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, side: ResponseSide) -> PoolEntry {
        PoolEntry::new(text, side, "tag")
    }

    #[test]
    fn balance_summary_reports_even_split() {
        let sequence = vec![
            entry("a", ResponseSide::Left),
            entry("b", ResponseSide::Right),
            entry("a", ResponseSide::Left),
            entry("b", ResponseSide::Right),
        ];
        let summary = balance_summary(&sequence).expect("summary");
        assert_eq!(summary.total, 4);
        assert_eq!(summary.distinct_entries, 2);
        assert_eq!(summary.min, 2);
        assert_eq!(summary.max, 2);
        assert!((summary.ratio - 1.0).abs() < 1e-9);
        assert!((summary.left_share - 0.5).abs() < 1e-9);
    }

    #[test]
    fn entry_counts_keep_first_seen_order() {
        let sequence = vec![
            entry("z", ResponseSide::Right),
            entry("a", ResponseSide::Left),
            entry("z", ResponseSide::Right),
        ];
        let counts = entry_counts(&sequence);
        let keys: Vec<&str> = counts.keys().map(|(text, _, _)| text.as_str()).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(counts[0], 2);
        assert_eq!(side_counts(&sequence), SideCounts { left: 1, right: 2 });
    }

    #[test]
    fn empty_sequence_has_no_summary() {
        let empty: Vec<PoolEntry> = Vec::new();
        assert!(balance_summary(&empty).is_none());
    }
}
