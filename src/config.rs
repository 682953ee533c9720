use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;
use crate::data::bucket::{Bins, FallbackPolicy};
use crate::data::model;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Which column feeds which view. Defaults match the published
/// Electric Vehicle Population export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub make: String,
    pub city: String,
    pub county: String,
    pub model: String,
    pub model_year: String,
    pub vehicle_type: String,
    pub postal_code: String,
    pub electric_range: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            make: model::MAKE.into(),
            city: model::CITY.into(),
            county: model::COUNTY.into(),
            model: model::MODEL.into(),
            model_year: model::MODEL_YEAR.into(),
            vehicle_type: model::VEHICLE_TYPE.into(),
            postal_code: model::POSTAL_CODE.into(),
            electric_range: model::ELECTRIC_RANGE.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Range histograms
// ---------------------------------------------------------------------------

/// Bins plus the parse-failure policy of one range chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub bins: Bins,
    pub policy: FallbackPolicy,
}

// ---------------------------------------------------------------------------
// Chart palette
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub manufacturers: Color,
    pub fuel_types: Vec<Color>,
    pub years: Color,
    pub model_share: Vec<Color>,
    pub top_models: Color,
    pub range_buckets: Vec<Color>,
    pub range_histogram: Color,
    pub cities: Color,
    pub counties: Color,
}

impl Default for Palette {
    fn default() -> Self {
        let blue = Color::rgb(0x3B, 0x82, 0xF6);
        let orange = Color::rgb(0xF9, 0x73, 0x16);
        let red = Color::rgb(0xEF, 0x44, 0x44);
        let emerald = Color::rgb(0x10, 0xB9, 0x81);
        let yellow = Color::rgb(0xFA, 0xCC, 0x15);
        let purple = Color::rgb(0x93, 0x33, 0xEA);
        let green = Color::rgb(0x22, 0xC5, 0x5E);
        Self {
            manufacturers: blue,
            fuel_types: vec![red, emerald, yellow, purple],
            years: orange,
            model_share: vec![blue, orange, red, emerald, purple],
            top_models: green,
            range_buckets: vec![blue, orange, green, purple],
            range_histogram: green,
            cities: blue,
            counties: orange,
        }
    }
}

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Everything the views and charts are parameterised by.
///
/// Any key missing from a config file takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub columns: Columns,
    /// How many models the top-models view keeps.
    pub top_models: usize,
    /// Pie-style range breakdown; unparsable ranges count as 0.
    pub range_buckets: RangeConfig,
    /// Stand-alone range histogram; unparsable ranges are dropped.
    pub range_histogram: RangeConfig,
    /// Label cap for the city and county bar charts.
    pub place_chart_limit: usize,
    /// Label cap for the manufacturer share doughnut.
    pub share_chart_limit: usize,
    /// Rows listed under the selected postal code.
    pub zip_summary_limit: usize,
    pub palette: Palette,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            columns: Columns::default(),
            top_models: 5,
            range_buckets: RangeConfig {
                bins: Bins::evenly_spaced(0, 100, 4, "miles"),
                policy: FallbackPolicy::ZeroFallback,
            },
            range_histogram: RangeConfig {
                bins: Bins::evenly_spaced(0, 50, 9, "miles"),
                policy: FallbackPolicy::Strict,
            },
            place_chart_limit: 10,
            share_chart_limit: 5,
            zip_summary_limit: 5,
            palette: Palette::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_dashboard() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.range_buckets.bins.bounds(), &[0, 100, 200, 300]);
        assert_eq!(cfg.range_buckets.policy, FallbackPolicy::ZeroFallback);
        assert_eq!(
            cfg.range_histogram.bins.bounds(),
            &[0, 50, 100, 150, 200, 250, 300, 350, 400]
        );
        assert_eq!(cfg.range_histogram.policy, FallbackPolicy::Strict);
        assert_eq!(cfg.columns.postal_code, "Postal Code");
        assert_eq!(cfg.top_models, 5);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = DashboardConfig::from_json_str(
            r##"{
                "top_models": 3,
                "columns": { "make": "Manufacturer" },
                "range_histogram": {
                    "bins": { "bounds": [0, 250], "unit": "km" },
                    "policy": "zero_fallback"
                },
                "palette": { "years": "#000000" }
            }"##,
        )
        .unwrap();
        assert_eq!(cfg.top_models, 3);
        assert_eq!(cfg.columns.make, "Manufacturer");
        assert_eq!(cfg.columns.city, "City");
        assert_eq!(cfg.range_histogram.bins.unit(), "km");
        assert_eq!(cfg.range_histogram.policy, FallbackPolicy::ZeroFallback);
        assert_eq!(cfg.palette.years, Color::rgb(0, 0, 0));
        assert_eq!(cfg.palette.top_models, Palette::default().top_models);
    }

    #[test]
    fn invalid_bins_or_colors_are_rejected() {
        let bins = r#"{ "range_buckets": { "bins": { "bounds": [100, 0] }, "policy": "strict" } }"#;
        assert!(matches!(
            DashboardConfig::from_json_str(bins),
            Err(ConfigError::Parse(_))
        ));
        let color = r#"{ "palette": { "cities": "blue" } }"#;
        assert!(DashboardConfig::from_json_str(color).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DashboardConfig::from_json_file(Path::new("/nonexistent/dashboard.json"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dashboard.json"));
    }
}
