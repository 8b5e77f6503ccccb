//! Series preparation pipeline.
//!
//! Data flows one way through four stages, each producing an immutable
//! value consumed by the next:
//!
//! 1. [`regularize`] - irregular observations to a gap-marked daily series
//! 2. [`impute`] - fill gaps by forward/backward carry averaging
//! 3. [`aggregate_monthly`] - downsample to one mean value per calendar month
//! 4. [`split_at`] - chronological train/test partition

pub mod aggregate;
pub mod impute;
pub mod regularize;
pub mod split;

pub use aggregate::{aggregate_monthly, MonthlyPoint, MonthlySeries};
pub use impute::{impute, ImputedSeries};
pub use regularize::{regularize, RegularSeries};
pub use split::{split_at, Split};
