use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Bins – validated bucket boundaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BinsError {
    #[error("bin bounds must be strictly ascending, but {prev} is followed by {next}")]
    NotAscending { prev: i64, next: i64 },
}

/// Ascending lower bounds of contiguous half-open buckets.
///
/// Bucket `i` covers `[bounds[i], bounds[i + 1])`; the last one has no upper
/// bound. Deserializing validates the bounds the same way [`Bins::new`] does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBins")]
pub struct Bins {
    bounds: Vec<i64>,
    unit: String,
}

#[derive(Deserialize)]
struct RawBins {
    bounds: Vec<i64>,
    #[serde(default)]
    unit: String,
}

impl TryFrom<RawBins> for Bins {
    type Error = BinsError;

    fn try_from(raw: RawBins) -> Result<Self, Self::Error> {
        Bins::new(raw.bounds, raw.unit)
    }
}

impl Bins {
    pub fn new(bounds: Vec<i64>, unit: impl Into<String>) -> Result<Self, BinsError> {
        if let Some(w) = bounds.windows(2).find(|w| w[0] >= w[1]) {
            return Err(BinsError::NotAscending {
                prev: w[0],
                next: w[1],
            });
        }
        Ok(Bins {
            bounds,
            unit: unit.into(),
        })
    }

    /// `count` bounds `start, start + step, ...`. A zero step is treated as
    /// 1, and bounds that would overflow `i64` are left off.
    pub fn evenly_spaced(start: i64, step: u32, count: usize, unit: impl Into<String>) -> Self {
        let step = i64::from(step.max(1));
        let bounds = (0..count)
            .map_while(|i| {
                i64::try_from(i)
                    .ok()
                    .and_then(|i| i.checked_mul(step))
                    .and_then(|offset| start.checked_add(offset))
            })
            .collect();
        Bins {
            bounds,
            unit: unit.into(),
        }
    }

    pub fn bounds(&self) -> &[i64] {
        &self.bounds
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Index of the bucket holding `v`, or `None` below the first bound.
    fn index_of(&self, v: i64) -> Option<usize> {
        self.bounds.partition_point(|&b| b <= v).checked_sub(1)
    }

    fn label(&self, i: usize) -> String {
        let body = match self.bounds.get(i + 1) {
            Some(high) => format!("{} - {}", self.bounds[i], high),
            None => format!("{}+", self.bounds[i]),
        };
        if self.unit.is_empty() {
            body
        } else {
            format!("{body} {}", self.unit)
        }
    }
}

// ---------------------------------------------------------------------------
// Fallback policy for unparsable cells
// ---------------------------------------------------------------------------

/// What to do with a cell that does not parse as an integer.
///
/// Each call site picks one policy and keeps it; the two are never mixed
/// within one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Drop the row from every bucket.
    Strict,
    /// Count the row as 0.
    ZeroFallback,
}

/// Parse the leading integer of `raw`.
///
/// Leading whitespace and one sign are accepted, then the longest run of
/// ASCII digits; trailing text is ignored ("120 miles" → 120, "12.5" → 12).
/// Values beyond the `i64` range saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for d in digits[..len].bytes() {
        let d = i64::from(d - b'0');
        value = value
            .saturating_mul(10)
            .saturating_add(if negative { -d } else { d });
    }
    Some(value)
}

// ---------------------------------------------------------------------------
// Bucketizing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub low: i64,
    /// Exclusive upper bound; `None` for the open-ended last bucket.
    pub high: Option<i64>,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub buckets: Vec<Bucket>,
    /// Rows that landed in no bucket: unparsable under `Strict`, or parsed
    /// below the first bound under either policy.
    pub excluded: usize,
}

impl BucketCounts {
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// Histogram `field` into `bins`, in a single pass over the rows.
///
/// Absent cells are treated like unparsable ones.
pub fn bucketize(
    dataset: &Dataset,
    field: &str,
    bins: &Bins,
    policy: FallbackPolicy,
) -> BucketCounts {
    let mut counts = vec![0usize; bins.bounds.len()];
    let mut excluded = 0;

    for row in dataset.rows() {
        let parsed = row.get(field).and_then(parse_leading_int);
        let value = match (parsed, policy) {
            (Some(v), _) => v,
            (None, FallbackPolicy::ZeroFallback) => 0,
            (None, FallbackPolicy::Strict) => {
                excluded += 1;
                continue;
            }
        };
        match bins.index_of(value) {
            Some(i) => counts[i] += 1,
            None => excluded += 1,
        }
    }

    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bucket {
            low: bins.bounds[i],
            high: bins.bounds.get(i + 1).copied(),
            label: bins.label(i),
            count,
        })
        .collect();

    BucketCounts { buckets, excluded }
}
