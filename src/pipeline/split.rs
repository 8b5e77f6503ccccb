//! Chronological train/test partition

use crate::error::{ForecastError, Result};
use crate::pipeline::aggregate::MonthlySeries;

/// A contiguous, order-preserving partition of a monthly series.
///
/// `train` holds the first k points and `test` the rest; together they
/// cover the full series exactly once, with no shuffling.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub train: MonthlySeries,
    pub test: MonthlySeries,
}

/// Partition a monthly series at a fixed index.
///
/// `k` counts training points, so the test set holds the remaining
/// `len - k` points. Returns [`ForecastError::InvalidSplit`] unless
/// `0 < k < len`, which guarantees both partitions are non-empty.
pub fn split_at(series: &MonthlySeries, k: usize) -> Result<Split> {
    let len = series.len();
    if k == 0 || k >= len {
        return Err(ForecastError::InvalidSplit { index: k, len });
    }

    let points = series.points();
    Ok(Split {
        train: MonthlySeries::from_points(points[..k].to_vec()),
        test: MonthlySeries::from_points(points[k..].to_vec()),
    })
}
