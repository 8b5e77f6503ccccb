use assert_approx_eq::assert_approx_eq;
use price_forecast::error::ForecastError;
use price_forecast::metrics::forecast_accuracy;
use rstest::rstest;

#[test]
fn perfect_forecast_scores_zero_everywhere() {
    let values = [10.0, 20.0, 30.0];
    let accuracy = forecast_accuracy(&values, &values).unwrap();

    assert_approx_eq!(accuracy.mae, 0.0);
    assert_approx_eq!(accuracy.mse, 0.0);
    assert_approx_eq!(accuracy.rmse, 0.0);
    assert_approx_eq!(accuracy.mape, 0.0);
    assert_approx_eq!(accuracy.smape, 0.0);
}

#[test]
fn known_error_values() {
    let actual = [10.0, 20.0, 30.0, 40.0, 50.0];
    let predicted = [12.0, 18.0, 33.0, 37.0, 52.0];
    let accuracy = forecast_accuracy(&actual, &predicted).unwrap();

    // absolute errors: 2, 2, 3, 3, 2
    assert_approx_eq!(accuracy.mae, 2.4);
    assert_approx_eq!(accuracy.mse, 6.0);
    assert_approx_eq!(accuracy.rmse, 6.0_f64.sqrt());
    // percentage errors: 20, 10, 10, 7.5, 4
    assert_approx_eq!(accuracy.mape, 10.3);
    assert_approx_eq!(accuracy.smape, 9.98914, 1e-4);
}

#[test]
fn rmse_is_sqrt_of_mse() {
    let actual = [3.0, 7.0, 1.0, 9.0];
    let predicted = [2.5, 8.0, 1.5, 7.0];
    let accuracy = forecast_accuracy(&actual, &predicted).unwrap();

    assert_approx_eq!(accuracy.rmse, accuracy.mse.sqrt());
}

#[test]
fn mape_skips_zero_actuals() {
    // Only the second position contributes, denominator stays the count
    let accuracy = forecast_accuracy(&[0.0, 10.0], &[5.0, 12.0]).unwrap();
    assert_approx_eq!(accuracy.mape, 10.0);
    assert!(accuracy.mape.is_finite());
}

#[test]
fn smape_is_symmetric() {
    let a = [10.0, 20.0, 30.0];
    let b = [12.0, 18.0, 33.0];
    let forward = forecast_accuracy(&a, &b).unwrap();
    let backward = forecast_accuracy(&b, &a).unwrap();

    assert_approx_eq!(forward.smape, backward.smape);
}

#[rstest]
#[case(&[1.0, 2.0][..], &[1.0][..])]
#[case(&[][..], &[][..])]
#[case(&[][..], &[1.0][..])]
fn mismatched_or_empty_inputs_are_rejected(#[case] actual: &[f64], #[case] predicted: &[f64]) {
    assert!(matches!(
        forecast_accuracy(actual, predicted),
        Err(ForecastError::MismatchedLength { .. })
    ));
}
