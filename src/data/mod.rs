/// Data layer: core types, loading, and the aggregation primitives.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (raw string cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Row>, column index
///   └──────────┘
///        │
///        ├──► group   distinct value → count (first-seen or ascending)
///        │      └──► rank    top-N by count, stable on ties
///        ├──► bucket  integer field → half-open bins
///        └──► filter  exact-match subsequence
/// ```

pub mod bucket;
pub mod filter;
pub mod group;
pub mod loader;
pub mod model;
pub mod rank;
