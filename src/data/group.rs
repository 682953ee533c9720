use indexmap::IndexMap;
use serde::Serialize;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// GroupCount – one distinct value and how often it occurs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

impl GroupCount {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        GroupCount {
            key: key.into(),
            count,
        }
    }
}

/// Order in which distinct values are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupOrder {
    /// Order of first appearance in the dataset.
    #[default]
    FirstSeen,
    /// Lexicographic ascending by key (year-like ordinal columns).
    Ascending,
}

/// Count rows per distinct value of `field`.
///
/// Rows missing the cell are grouped under the empty key, so the counts of a
/// known column always sum to `dataset.len()`. A column that no row carries
/// yields an empty result.
pub fn group_count(dataset: &Dataset, field: &str, order: GroupOrder) -> Vec<GroupCount> {
    if !dataset.has_column(field) {
        return Vec::new();
    }

    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for row in dataset.rows() {
        *counts.entry(row.get(field).unwrap_or("")).or_insert(0) += 1;
    }

    let mut groups: Vec<GroupCount> = counts
        .into_iter()
        .map(|(key, count)| GroupCount::new(key, count))
        .collect();

    if order == GroupOrder::Ascending {
        groups.sort_by(|a, b| a.key.cmp(&b.key));
    }
    groups
}

/// Distinct values of `field` in first-seen order.
pub fn distinct_values(dataset: &Dataset, field: &str) -> Vec<String> {
    group_count(dataset, field, GroupOrder::FirstSeen)
        .into_iter()
        .map(|g| g.key)
        .collect()
}
