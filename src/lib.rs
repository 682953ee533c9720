//! Aggregation engine for the electric vehicle registration dashboard.
//!
//! A [`Dataset`](data::model::Dataset) is loaded once and never mutated;
//! [`compute_views`](views::compute_views) turns it, together with the
//! current postal-code selection, into a [`ViewSnapshot`](views::ViewSnapshot)
//! of grouped counts, top-N rankings, range buckets and the filtered rows.
//! [`chart`] turns a snapshot into index-aligned series for a renderer.

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod views;
