use super::model::{Dataset, Row};

/// Rows whose `field` equals `value` exactly, in dataset order.
///
/// An empty `value` means "nothing selected yet" and matches no rows, not
/// all of them. Rows missing the cell never match.
pub fn filter_by_field<'a>(dataset: &'a Dataset, field: &str, value: &str) -> Vec<&'a Row> {
    if value.is_empty() {
        return Vec::new();
    }
    dataset
        .rows()
        .iter()
        .filter(|row| row.get(field) == Some(value))
        .collect()
}
