//! End-to-end scenarios over small hand-written tables.

use ev_dashboard::data::bucket::{bucketize, Bins, FallbackPolicy};
use ev_dashboard::data::filter::filter_by_field;
use ev_dashboard::data::group::{group_count, GroupCount, GroupOrder};
use ev_dashboard::data::loader::read_csv;
use ev_dashboard::data::model::{Dataset, Row, ELECTRIC_RANGE, MAKE, POSTAL_CODE};
use ev_dashboard::data::rank::top_n;
use ev_dashboard::views::compute_views;

fn column(field: &str, values: &[&str]) -> Dataset {
    Dataset::from_rows(
        values
            .iter()
            .map(|v| Row::from_iter([(field, *v)]))
            .collect(),
    )
}

#[test]
fn make_counts_in_first_seen_order() {
    let ds = column(MAKE, &["A", "A", "B", "C", "A"]);
    assert_eq!(
        group_count(&ds, MAKE, GroupOrder::FirstSeen),
        vec![
            GroupCount::new("A", 3),
            GroupCount::new("B", 1),
            GroupCount::new("C", 1),
        ]
    );
}

#[test]
fn top_two_breaks_ties_by_first_seen() {
    let ds = column(MAKE, &["A", "A", "B", "C", "A"]);
    let groups = group_count(&ds, MAKE, GroupOrder::FirstSeen);
    assert_eq!(
        top_n(&groups, 2),
        vec![GroupCount::new("A", 3), GroupCount::new("B", 1)]
    );
}

#[test]
fn strict_range_histogram_excludes_bad_values() {
    let ds = column(ELECTRIC_RANGE, &["120", "abc", "300", "-5", "450"]);
    let bins = Bins::new(vec![0, 100, 200, 300, 400], "miles").unwrap();
    let result = bucketize(&ds, ELECTRIC_RANGE, &bins, FallbackPolicy::Strict);

    let labels: Vec<_> = result.buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "0 - 100 miles",
            "100 - 200 miles",
            "200 - 300 miles",
            "300 - 400 miles",
            "400+ miles",
        ]
    );
    // 300 sits on a lower bound, so it belongs to [300, 400).
    let counts: Vec<_> = result.buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![0, 1, 0, 1, 1]);
    assert_eq!(result.excluded, 2);
    assert_eq!(result.total(), 3);
}

#[test]
fn zero_fallback_keeps_every_row() {
    let ds = column(ELECTRIC_RANGE, &["120", "abc", "300", "", "450"]);
    let bins = Bins::new(vec![0, 100, 200, 300, 400], "miles").unwrap();
    let result = bucketize(&ds, ELECTRIC_RANGE, &bins, FallbackPolicy::ZeroFallback);
    assert_eq!(result.buckets[0].count, 2);
    assert_eq!(result.total(), ds.len());
}

#[test]
fn zip_filter_over_a_csv_export() {
    let text = "\
VIN,Postal Code,Make,Model,Model Year,Electric Range
5YJ3E1EA,98101,TESLA,MODEL 3,2020,266
1N4AZ0CP,98052,NISSAN,LEAF,2015,84
5YJYGDEE,98101,TESLA,MODEL Y,2022,0
WBY8P2C0,,BMW,I3,2019,153
";
    let ds = read_csv(text.as_bytes()).unwrap();

    let matches = filter_by_field(&ds, POSTAL_CODE, "98101");
    let models: Vec<_> = matches.iter().filter_map(|r| r.get("Model")).collect();
    assert_eq!(models, vec!["MODEL 3", "MODEL Y"]);
    assert!(filter_by_field(&ds, POSTAL_CODE, "").is_empty());

    let snap = compute_views(&ds, "98052");
    assert_eq!(snap.zip_codes, vec!["98101", "98052"]);
    assert_eq!(snap.zip_matches.len(), 1);
    assert_eq!(snap.zip_matches[0].get(MAKE), Some("NISSAN"));
    assert_eq!(snap.range_buckets.total(), 4);
}

#[test]
fn recomputing_is_deterministic() {
    let ds = column(MAKE, &["KIA", "BMW", "KIA"]);
    assert_eq!(compute_views(&ds, "x"), compute_views(&ds, "x"));
}
