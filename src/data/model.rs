use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

// ---------------------------------------------------------------------------
// Well-known columns of the registration table
// ---------------------------------------------------------------------------

pub const MAKE: &str = "Make";
pub const CITY: &str = "City";
pub const COUNTY: &str = "County";
pub const MODEL: &str = "Model";
pub const MODEL_YEAR: &str = "Model Year";
pub const VEHICLE_TYPE: &str = "Electric Vehicle Type";
pub const POSTAL_CODE: &str = "Postal Code";
pub const ELECTRIC_RANGE: &str = "Electric Range";

// ---------------------------------------------------------------------------
// Row – one registration record
// ---------------------------------------------------------------------------

/// One record of the dataset: column name → raw cell text.
///
/// A missing cell is simply absent from the map; loaders never store
/// placeholder strings for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of `field`, or `None` when the cell is absent.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.cells.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(field.into(), value.into());
    }

    /// Column names present in this row.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All rows of one load, in arrival order, with the column index.
///
/// Row order is meaningful: it defines first-seen order for groups.
/// A dataset is never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<Row>,
    /// Sorted union of column names seen in any row.
    column_names: Vec<String>,
}

impl Dataset {
    /// Build the column index from the loaded rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let column_names: BTreeSet<String> = rows
            .iter()
            .flat_map(|row| row.fields().map(str::to_string))
            .collect();
        Dataset {
            rows,
            column_names: column_names.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Whether any row carries `field`.
    pub fn has_column(&self, field: &str) -> bool {
        self.column_names
            .binary_search_by(|c| c.as_str().cmp(field))
            .is_ok()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
