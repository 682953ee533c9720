use log::debug;
use serde::Serialize;

use crate::config::{DashboardConfig, RangeConfig};
use crate::data::bucket::{bucketize, BucketCounts};
use crate::data::filter::filter_by_field;
use crate::data::group::{distinct_values, group_count, GroupCount, GroupOrder};
use crate::data::model::{Dataset, Row};
use crate::data::rank::top_n;

// ---------------------------------------------------------------------------
// ViewSnapshot – every derived view for one (dataset, selection) pair
// ---------------------------------------------------------------------------

/// All views the dashboard shows, computed together.
///
/// A snapshot owns its data and is never updated in place; a new dataset or
/// a new postal-code selection produces a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub row_count: usize,
    pub manufacturers: Vec<GroupCount>,
    pub cities: Vec<GroupCount>,
    pub counties: Vec<GroupCount>,
    pub fuel_types: Vec<GroupCount>,
    /// Model years, ascending.
    pub years: Vec<GroupCount>,
    pub models: Vec<GroupCount>,
    pub top_models: Vec<GroupCount>,
    pub range_buckets: BucketCounts,
    pub range_histogram: BucketCounts,
    /// Selectable postal codes in first-seen order. The empty code is left
    /// out since it doubles as "no selection".
    pub zip_codes: Vec<String>,
    pub selected_zip: String,
    pub zip_matches: Vec<Row>,
}

impl ViewSnapshot {
    /// The snapshot of a dataset that never loaded.
    pub fn empty() -> Self {
        compute_views(&Dataset::empty(), "")
    }
}

/// Compute every view with the default column mapping and bins.
pub fn compute_views(dataset: &Dataset, filter_value: &str) -> ViewSnapshot {
    compute_views_with(&DashboardConfig::default(), dataset, filter_value)
}

/// Compute every view from scratch.
///
/// Pure in `(config, dataset, filter_value)`; nothing is cached between
/// calls.
pub fn compute_views_with(
    config: &DashboardConfig,
    dataset: &Dataset,
    filter_value: &str,
) -> ViewSnapshot {
    let cols = &config.columns;
    let count = |field: &str| group_count(dataset, field, GroupOrder::FirstSeen);
    let ranges = |range: &RangeConfig| {
        bucketize(dataset, &cols.electric_range, &range.bins, range.policy)
    };

    let models = count(&cols.model);
    let top_models = top_n(&models, config.top_models);

    let zip_codes = distinct_values(dataset, &cols.postal_code)
        .into_iter()
        .filter(|zip| !zip.is_empty())
        .collect();
    let zip_matches: Vec<Row> = filter_by_field(dataset, &cols.postal_code, filter_value)
        .into_iter()
        .cloned()
        .collect();

    let snapshot = ViewSnapshot {
        row_count: dataset.len(),
        manufacturers: count(&cols.make),
        cities: count(&cols.city),
        counties: count(&cols.county),
        fuel_types: count(&cols.vehicle_type),
        years: group_count(dataset, &cols.model_year, GroupOrder::Ascending),
        models,
        top_models,
        range_buckets: ranges(&config.range_buckets),
        range_histogram: ranges(&config.range_histogram),
        zip_codes,
        selected_zip: filter_value.to_string(),
        zip_matches,
    };

    debug!(
        "recomputed views: {} rows, {} makes, {} models, zip '{}' matched {}",
        snapshot.row_count,
        snapshot.manufacturers.len(),
        snapshot.models.len(),
        snapshot.selected_zip,
        snapshot.zip_matches.len()
    );
    snapshot
}
