//! Monthly aggregation with a cyclical month feature and integer time index

use crate::pipeline::impute::ImputedSeries;
use chrono::Datelike;
use serde::Serialize;

/// One aggregated month of the series.
///
/// The calendar year is deliberately dropped: `month` is the month-of-year
/// category (1-12, reused across years) so that a seasonal regression can
/// treat two Januaries as the same level. `time_index` records the position
/// in the monthly sequence instead, starting at 1 with no gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyPoint {
    /// Month-of-year category, 1 through 12
    pub month: u32,
    /// 1-based position in the monthly sequence, contiguous
    pub time_index: usize,
    /// Mean of the daily values falling in this month
    pub mean_value: f64,
}

/// A chronologically ordered monthly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySeries {
    points: Vec<MonthlyPoint>,
}

impl MonthlySeries {
    /// Build a monthly series from prepared points.
    pub fn from_points(points: Vec<MonthlyPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[MonthlyPoint] {
        &self.points
    }

    /// Mean values in chronological order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.mean_value).collect()
    }

    /// Month-of-year categories in chronological order.
    pub fn months(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.month).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Time index of the final point, if any.
    pub fn last_time_index(&self) -> Option<usize> {
        self.points.last().map(|p| p.time_index)
    }

    /// Month category of the final point, if any.
    pub fn last_month(&self) -> Option<u32> {
        self.points.last().map(|p| p.month)
    }
}

/// Downsample a gap-free daily series to one mean value per calendar month.
///
/// Days are grouped by (year, month) in calendar order; each group becomes
/// one [`MonthlyPoint`] carrying the group mean, the month-of-year category
/// and a contiguous 1-based time index. The sum of the per-month day counts
/// equals the daily series length.
pub fn aggregate_monthly(series: &ImputedSeries) -> MonthlySeries {
    let mut points = Vec::new();
    // (year, month, running sum, day count) of the group being accumulated
    let mut current: Option<(i32, u32, f64, u32)> = None;

    for (i, &value) in series.values().iter().enumerate() {
        let date = series.date_at(i);
        let key = (date.year(), date.month());

        match current.as_mut() {
            Some((year, month, sum, count)) if (*year, *month) == key => {
                *sum += value;
                *count += 1;
            }
            _ => {
                if let Some((_, month, sum, count)) = current.take() {
                    points.push(MonthlyPoint {
                        month,
                        time_index: points.len() + 1,
                        mean_value: sum / count as f64,
                    });
                }
                current = Some((key.0, key.1, value, 1));
            }
        }
    }

    if let Some((_, month, sum, count)) = current {
        points.push(MonthlyPoint {
            month,
            time_index: points.len() + 1,
            mean_value: sum / count as f64,
        });
    }

    MonthlySeries { points }
}
