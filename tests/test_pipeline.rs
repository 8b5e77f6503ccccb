use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use price_forecast::data::Observation;
use price_forecast::error::ForecastError;
use price_forecast::pipeline::{
    aggregate_monthly, impute, regularize, split_at, MonthlyPoint, MonthlySeries, RegularSeries,
};
use rstest::rstest;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn obs(year: i32, month: u32, day: u32, value: f64) -> Observation {
    Observation {
        date: date(year, month, day),
        value,
    }
}

#[test]
fn regularize_spans_full_calendar_range() {
    // 3 distinct dates spanning 7 calendar days
    let observations = vec![
        obs(2024, 3, 1, 10.0),
        obs(2024, 3, 4, 16.0),
        obs(2024, 3, 7, 22.0),
    ];

    let series = regularize(&observations).unwrap();
    assert_eq!(series.len(), 7);
    assert_eq!(series.known_count(), 3);
    assert_eq!(series.values()[0], Some(10.0));
    assert_eq!(series.values()[1], None);
    assert_eq!(series.values()[3], Some(16.0));
    assert_eq!(series.values()[6], Some(22.0));
    assert_eq!(series.start(), date(2024, 3, 1));
}

#[test]
fn regularize_averages_duplicate_dates() {
    let observations = vec![
        obs(2024, 3, 1, 10.0),
        obs(2024, 3, 1, 20.0),
        obs(2024, 3, 2, 30.0),
    ];

    let series = regularize(&observations).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.values(), &[Some(15.0), Some(30.0)]);
}

#[test]
fn regularize_is_input_order_independent() {
    let ordered = vec![
        obs(2024, 3, 1, 10.0),
        obs(2024, 3, 2, 12.0),
        obs(2024, 3, 5, 18.0),
    ];
    let shuffled = vec![
        obs(2024, 3, 5, 18.0),
        obs(2024, 3, 1, 10.0),
        obs(2024, 3, 2, 12.0),
    ];

    assert_eq!(
        regularize(&ordered).unwrap(),
        regularize(&shuffled).unwrap()
    );
}

#[test]
fn regularize_rejects_empty_input() {
    assert!(matches!(
        regularize(&[]),
        Err(ForecastError::EmptyInput)
    ));
}

#[test]
fn regularize_single_observation() {
    let series = regularize(&[obs(2024, 3, 15, 42.0)]).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series.values(), &[Some(42.0)]);
}

#[test]
fn impute_is_identity_on_complete_series() {
    let observations = vec![
        obs(2024, 3, 1, 10.0),
        obs(2024, 3, 2, 12.0),
        obs(2024, 3, 3, 14.0),
    ];
    let regular = regularize(&observations).unwrap();

    let imputed = impute(&regular).unwrap();
    assert_eq!(imputed.values(), &[10.0, 12.0, 14.0]);
}

#[test]
fn impute_fills_interior_gap_with_neighbor_average() {
    let observations = vec![obs(2024, 3, 1, 10.0), obs(2024, 3, 3, 20.0)];
    let regular = regularize(&observations).unwrap();

    let imputed = impute(&regular).unwrap();
    assert_eq!(imputed.values(), &[10.0, 15.0, 20.0]);
}

#[test]
fn impute_boundary_gaps_degenerate_to_nearest_known() {
    // Missing at both ends: only one carry exists there
    let regular = RegularSeries::new(
        date(2024, 3, 1),
        vec![None, Some(8.0), Some(12.0), None],
    )
    .unwrap();

    let imputed = impute(&regular).unwrap();
    assert_eq!(imputed.values(), &[8.0, 8.0, 12.0, 12.0]);
}

#[test]
fn impute_rejects_all_missing_series() {
    let regular = RegularSeries::new(date(2024, 3, 1), vec![None, None, None]).unwrap();
    assert!(matches!(impute(&regular), Err(ForecastError::AllMissing)));
}

#[test]
fn aggregate_produces_contiguous_time_index() {
    // 14 months of daily data: January 2023 through February 2024
    let observations: Vec<Observation> = (0..425)
        .map(|i| Observation {
            date: date(2023, 1, 1) + chrono::Duration::days(i),
            value: 100.0 + i as f64,
        })
        .collect();

    let monthly = aggregate_monthly(&impute(&regularize(&observations).unwrap()).unwrap());
    assert_eq!(monthly.len(), 14);

    let indices: Vec<usize> = monthly.points().iter().map(|p| p.time_index).collect();
    assert_eq!(indices, (1..=14).collect::<Vec<usize>>());

    // month-of-year collapses across years
    let months = monthly.months();
    assert_eq!(months[0], 1);
    assert_eq!(months[12], 1);
    assert_eq!(months[13], 2);
}

#[test]
fn aggregate_conserves_day_counts() {
    // January (31 days) and February (29 days, 2024 is a leap year)
    let observations: Vec<Observation> = (0..60)
        .map(|i| Observation {
            date: date(2024, 1, 1) + chrono::Duration::days(i),
            value: 10.0,
        })
        .collect();

    let daily = impute(&regularize(&observations).unwrap()).unwrap();
    let monthly = aggregate_monthly(&daily);

    assert_eq!(monthly.len(), 2);
    assert_eq!(daily.len(), 60);
    assert_eq!(monthly.values(), vec![10.0, 10.0]);
}

#[test]
fn aggregate_takes_monthly_means() {
    // Two days in January, two in February
    let observations = vec![
        obs(2024, 1, 30, 10.0),
        obs(2024, 1, 31, 20.0),
        obs(2024, 2, 1, 30.0),
        obs(2024, 2, 2, 50.0),
    ];

    let monthly = aggregate_monthly(&impute(&regularize(&observations).unwrap()).unwrap());
    assert_eq!(monthly.values(), vec![15.0, 40.0]);
    assert_eq!(monthly.months(), vec![1, 2]);
}

fn monthly_fixture(len: usize) -> MonthlySeries {
    MonthlySeries::from_points(
        (0..len)
            .map(|i| MonthlyPoint {
                month: (i % 12) as u32 + 1,
                time_index: i + 1,
                mean_value: i as f64,
            })
            .collect(),
    )
}

#[test]
fn split_is_exact_partition() {
    let series = monthly_fixture(10);
    let split = split_at(&series, 7).unwrap();

    assert_eq!(split.train.len(), 7);
    assert_eq!(split.test.len(), 3);
    assert_eq!(split.train.len() + split.test.len(), series.len());

    let mut recombined = split.train.points().to_vec();
    recombined.extend_from_slice(split.test.points());
    assert_eq!(recombined, series.points().to_vec());
}

#[rstest]
#[case(0)]
#[case(10)]
#[case(11)]
fn split_rejects_out_of_bounds_index(#[case] k: usize) {
    let series = monthly_fixture(10);
    assert!(matches!(
        split_at(&series, k),
        Err(ForecastError::InvalidSplit { index, len: 10 }) if index == k
    ));
}

#[test]
fn end_to_end_five_day_scenario() {
    // 4 distinct dates over a 5-day span, one date recorded twice, one
    // day absent entirely
    let observations = vec![
        obs(2024, 1, 1, 10.0),
        obs(2024, 1, 2, 20.0),
        obs(2024, 1, 2, 30.0),
        obs(2024, 1, 3, 30.0),
        obs(2024, 1, 5, 40.0),
    ];

    let regular = regularize(&observations).unwrap();
    assert_eq!(regular.len(), 5);
    assert_eq!(regular.values()[1], Some(25.0)); // duplicate reduced by mean
    assert_eq!(regular.values()[3], None); // gap is explicit

    let daily = impute(&regular).unwrap();
    assert_eq!(daily.values()[3], 35.0); // average of the two neighbors

    let monthly = aggregate_monthly(&daily);
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly.values(), vec![28.0]);
    assert_eq!(monthly.points()[0].time_index, 1);
    assert_eq!(monthly.points()[0].month, 1);
}
