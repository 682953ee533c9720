use serde::Serialize;

use crate::color::{Color, ColorSpec};
use crate::config::{DashboardConfig, Palette};
use crate::data::bucket::BucketCounts;
use crate::data::group::GroupCount;
use crate::data::model::Row;
use crate::views::ViewSnapshot;

// ---------------------------------------------------------------------------
// Chart descriptors handed to the renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
    Doughnut,
}

/// One chart: index-aligned labels and values plus how to paint them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub kind: ChartKind,
    labels: Vec<String>,
    values: Vec<f64>,
    pub color: ColorSpec,
}

impl ChartSeries {
    /// Build from `(label, value)` pairs so labels and values always line up.
    pub fn new<I>(title: impl Into<String>, kind: ChartKind, points: I, color: ColorSpec) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let (labels, values) = points.into_iter().unzip();
        ChartSeries {
            title: title.into(),
            kind,
            labels,
            values,
            color,
        }
    }

    fn from_groups(
        title: &str,
        kind: ChartKind,
        groups: &[GroupCount],
        limit: usize,
        color: ColorSpec,
    ) -> Self {
        let points = groups
            .iter()
            .take(limit)
            .map(|g| (g.key.clone(), g.count as f64));
        Self::new(title, kind, points, color)
    }

    fn from_buckets(
        title: &str,
        kind: ChartKind,
        buckets: &BucketCounts,
        color: ColorSpec,
    ) -> Self {
        let points = buckets
            .buckets
            .iter()
            .map(|b| (b.label.clone(), b.count as f64));
        Self::new(title, kind, points, color)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Border colour, taken from the fill.
    pub fn border_color(&self) -> Option<Color> {
        self.color.primary()
    }
}

/// The dashboard panels, in display order.
pub fn dashboard_charts(config: &DashboardConfig, snap: &ViewSnapshot) -> Vec<ChartSeries> {
    let Palette {
        manufacturers,
        fuel_types,
        years,
        model_share,
        top_models,
        range_buckets,
        range_histogram,
        cities,
        counties,
    } = &config.palette;
    let share_len = snap.manufacturers.len().min(config.share_chart_limit);

    vec![
        ChartSeries::from_groups(
            "Vehicle Count by Manufacturer",
            ChartKind::Bar,
            &snap.manufacturers,
            usize::MAX,
            ColorSpec::Single(*manufacturers),
        ),
        ChartSeries::from_groups(
            "Fuel Type Distribution",
            ChartKind::Pie,
            &snap.fuel_types,
            usize::MAX,
            ColorSpec::per_label(fuel_types, snap.fuel_types.len()),
        ),
        ChartSeries::from_groups(
            "Growth of EV Registrations Over Years",
            ChartKind::Line,
            &snap.years,
            usize::MAX,
            ColorSpec::Single(*years),
        ),
        ChartSeries::from_groups(
            "Proportion of Different EV Models",
            ChartKind::Doughnut,
            &snap.manufacturers,
            config.share_chart_limit,
            ColorSpec::per_label(model_share, share_len),
        ),
        ChartSeries::from_groups(
            &format!("Top {} Popular EV Models", config.top_models),
            ChartKind::Bar,
            &snap.top_models,
            usize::MAX,
            ColorSpec::Single(*top_models),
        ),
        ChartSeries::from_buckets(
            "Electric Range Distribution",
            ChartKind::Pie,
            &snap.range_buckets,
            ColorSpec::per_label(range_buckets, snap.range_buckets.buckets.len()),
        ),
        ChartSeries::from_groups(
            "EV Count by City",
            ChartKind::Bar,
            &snap.cities,
            config.place_chart_limit,
            ColorSpec::Single(*cities),
        ),
        ChartSeries::from_groups(
            "EV Count by County",
            ChartKind::Bar,
            &snap.counties,
            config.place_chart_limit,
            ColorSpec::Single(*counties),
        ),
        ChartSeries::from_buckets(
            "Electric Range Distribution (Histogram)",
            ChartKind::Bar,
            &snap.range_histogram,
            ColorSpec::Single(*range_histogram),
        ),
    ]
}

/// "Make Model (Year)" for the first `limit` rows under the selected code.
pub fn zip_summary(config: &DashboardConfig, snap: &ViewSnapshot, limit: usize) -> Vec<String> {
    let cols = &config.columns;
    let cell = |row: &Row, field: &str| row.get(field).unwrap_or("").to_string();
    snap.zip_matches
        .iter()
        .take(limit)
        .map(|row| {
            format!(
                "{} {} ({})",
                cell(row, &cols.make),
                cell(row, &cols.model),
                cell(row, &cols.model_year)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, CITY, MAKE, MODEL, MODEL_YEAR, POSTAL_CODE, VEHICLE_TYPE};
    use crate::views::{compute_views, compute_views_with};

    fn snapshot(zip: &str) -> ViewSnapshot {
        let rows = (0..12)
            .map(|i| {
                Row::from_iter([
                    (MAKE.to_string(), format!("MAKE{}", i % 7)),
                    (MODEL.to_string(), format!("M{}", i % 3)),
                    (MODEL_YEAR.to_string(), format!("{}", 2010 + i % 4)),
                    (CITY.to_string(), format!("City{i}")),
                    (POSTAL_CODE.to_string(), format!("9800{}", i % 2)),
                    (VEHICLE_TYPE.to_string(), format!("Type{}", i % 6)),
                ])
            })
            .collect();
        compute_views(&Dataset::from_rows(rows), zip)
    }

    #[test]
    fn panels_follow_the_dashboard_layout() {
        let charts = dashboard_charts(&DashboardConfig::default(), &snapshot(""));
        let titles: Vec<_> = charts.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Vehicle Count by Manufacturer",
                "Fuel Type Distribution",
                "Growth of EV Registrations Over Years",
                "Proportion of Different EV Models",
                "Top 5 Popular EV Models",
                "Electric Range Distribution",
                "EV Count by City",
                "EV Count by County",
                "Electric Range Distribution (Histogram)",
            ]
        );
        for chart in &charts {
            assert_eq!(chart.labels().len(), chart.values().len(), "{}", chart.title);
        }
    }

    #[test]
    fn limits_and_per_label_colors() {
        let charts = dashboard_charts(&DashboardConfig::default(), &snapshot(""));
        assert_eq!(charts[0].len(), 7);
        assert_eq!(charts[3].len(), 5);
        assert_eq!(charts[6].len(), 10);
        assert!(charts[7].is_empty());

        match &charts[1].color {
            ColorSpec::PerLabel(cs) => assert_eq!(cs.len(), 6),
            other => panic!("expected per-label colours, got {other:?}"),
        }
        assert_eq!(
            charts[1].border_color(),
            Some(Color::rgb(0xEF, 0x44, 0x44))
        );
        assert_eq!(charts[2].labels()[0], "2010");
    }

    #[test]
    fn top_models_title_follows_config() {
        let mut cfg = DashboardConfig::default();
        cfg.top_models = 3;
        let snap = compute_views_with(&cfg, &Dataset::empty(), "");
        let charts = dashboard_charts(&cfg, &snap);
        assert_eq!(charts[4].title, "Top 3 Popular EV Models");
    }

    #[test]
    fn zip_summary_lists_first_matches() {
        let cfg = DashboardConfig::default();
        let snap = snapshot("98001");
        let lines = zip_summary(&cfg, &snap, cfg.zip_summary_limit);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "MAKE1 M1 (2011)");
        assert!(zip_summary(&cfg, &snapshot(""), 5).is_empty());
    }
}
