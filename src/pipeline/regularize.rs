//! Daily regularization of irregular observations

use crate::data::Observation;
use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// A complete, evenly spaced daily series over a calendar range.
///
/// Covers every day from its start date onward with no duplicates and no
/// gaps; days without an observed value carry an explicit `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularSeries {
    start: NaiveDate,
    values: Vec<Option<f64>>,
}

impl RegularSeries {
    /// Build a daily series directly from a start date and values.
    pub fn new(start: NaiveDate, values: Vec<Option<f64>>) -> Result<Self> {
        if values.is_empty() {
            return Err(ForecastError::EmptyInput);
        }
        Ok(Self { start, values })
    }

    /// First calendar day covered by the series.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Values in day order, `None` marking a missing day.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of calendar days covered.
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

    /// Iterator over the covered dates in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.values.len()).map(move |i| self.date_at(i))
    }

    /// Number of days carrying a known value.
    pub fn known_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Turn raw observations into a gap-marked daily series.
///
/// Duplicate dates are reduced by averaging their values, then the full
/// calendar range from the earliest to the latest observed date is
/// materialized, with `None` for every day absent from the input. The
/// input order is irrelevant.
///
/// Returns [`ForecastError::EmptyInput`] when given no observations. A
/// single observation yields a series of length 1 with no gaps.
pub fn regularize(observations: &[Observation]) -> Result<RegularSeries> {
    if observations.is_empty() {
        return Err(ForecastError::EmptyInput);
    }

    let mut by_date: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    for obs in observations {
        let entry = by_date.entry(obs.date).or_insert((0.0, 0));
        entry.0 += obs.value;
        entry.1 += 1;
    }

    let (&start, _) = by_date.first_key_value().ok_or(ForecastError::EmptyInput)?;
    let (&end, _) = by_date.last_key_value().ok_or(ForecastError::EmptyInput)?;
    let days = (end - start).num_days() as usize + 1;

    let mut values = Vec::with_capacity(days);
    for offset in 0..days {
        let date = start + Duration::days(offset as i64);
        values.push(by_date.get(&date).map(|(sum, count)| sum / *count as f64));
    }

    RegularSeries::new(start, values)
}
