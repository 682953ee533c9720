use crate::config::DashboardConfig;
use crate::data::model::Dataset;
use crate::views::{compute_views_with, ViewSnapshot};

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Holds the loaded dataset and the current selection, and republishes the
/// snapshot whenever either changes.
pub struct DashboardState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a load completes).
    pub dataset: Option<Dataset>,

    /// Selected postal code; empty means nothing selected.
    pub selected_zip: String,

    /// Views for the current dataset and selection.
    pub snapshot: ViewSnapshot,

    /// Status / error message for the consumer.
    pub status_message: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl DashboardState {
    pub fn new(config: DashboardConfig) -> Self {
        let snapshot = compute_views_with(&config, &Dataset::empty(), "");
        Self {
            config,
            dataset: None,
            selected_zip: String::new(),
            snapshot,
            status_message: None,
        }
    }

    /// Replace the dataset and recompute every view.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// A failed load leaves an empty dataset behind; views go empty.
    pub fn set_load_failed(&mut self, message: impl Into<String>) {
        self.dataset = Some(Dataset::empty());
        self.status_message = Some(message.into());
        self.recompute();
    }

    /// Change the postal-code selection and recompute.
    pub fn select_zip(&mut self, zip: impl Into<String>) {
        self.selected_zip = zip.into();
        self.recompute();
    }

    fn recompute(&mut self) {
        let empty = Dataset::empty();
        let dataset = self.dataset.as_ref().unwrap_or(&empty);
        self.snapshot = compute_views_with(&self.config, dataset, &self.selected_zip);
    }
}
