//! Gap filling by forward/backward carry averaging

use crate::error::{ForecastError, Result};
use crate::pipeline::regularize::RegularSeries;
use chrono::{Duration, NaiveDate};

/// A daily series with every gap filled.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputedSeries {
    start: NaiveDate,
    values: Vec<f64>,
}

impl ImputedSeries {
    /// First calendar day covered by the series.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Values in day order, one per calendar day, none missing.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Calendar date of the value at `index`.
    pub fn date_at(&self, index: usize) -> NaiveDate {
        self.start + Duration::days(index as i64)
    }
}

/// Fill every gap in a daily series.
///
/// Two carries are computed: the last known value carried forward and the
/// next known value carried backward. Each position takes the average of
/// the two; at a known position both carries equal the original value, so
/// the operation is the identity there. A gap before the first known value
/// or after the last one degenerates to the single available carry.
///
/// Returns [`ForecastError::AllMissing`] when the series has no known
/// value at all.
pub fn impute(series: &RegularSeries) -> Result<ImputedSeries> {
    let raw = series.values();
    if raw.iter().all(|v| v.is_none()) {
        return Err(ForecastError::AllMissing);
    }

    let mut forward = Vec::with_capacity(raw.len());
    let mut carried = None;
    for value in raw {
        if value.is_some() {
            carried = *value;
        }
        forward.push(carried);
    }

    let mut backward = vec![None; raw.len()];
    let mut carried = None;
    for (i, value) in raw.iter().enumerate().rev() {
        if value.is_some() {
            carried = *value;
        }
        backward[i] = carried;
    }

    let values = forward
        .iter()
        .zip(&backward)
        .map(|(ahead, behind)| match (*ahead, *behind) {
            (Some(a), Some(b)) => (a + b) / 2.0,
            (Some(a), None) => a,
            (None, Some(b)) => b,
            // both carries empty only when every value is missing,
            // rejected above
            (None, None) => unreachable!(),
        })
        .collect();

    Ok(ImputedSeries {
        start: series.start(),
        values,
    })
}
