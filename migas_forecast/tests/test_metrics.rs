use approx::assert_relative_eq;
use migas_forecast::metrics::{forecast_accuracy, forecast_errors, mean_absolute_percentage_error};

#[test]
fn test_regression_metrics() {
    let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

    let accuracy = forecast_accuracy(&predicted, &actual).unwrap();

    assert_relative_eq!(accuracy.mae, 2.4);
    assert_relative_eq!(accuracy.mse, 6.0);
    assert_relative_eq!(accuracy.rmse, 6.0_f64.sqrt());

    let mape = (2.0 / 10.0 + 2.0 / 20.0 + 3.0 / 30.0 + 3.0 / 40.0 + 2.0 / 50.0) * 100.0 / 5.0;
    assert_relative_eq!(accuracy.mape, mape, epsilon = 1e-9);
    assert!(accuracy.smape > 0.0 && accuracy.smape < mape + 1.0);
}

#[test]
fn test_zero_actuals_skipped_in_mape() {
    let accuracy = forecast_accuracy(&[1.0, 110.0], &[0.0, 100.0]).unwrap();
    assert_relative_eq!(accuracy.mape, 5.0);
}

#[test]
fn test_errors_are_actual_minus_forecast() {
    let errors = forecast_errors(&[12.0, 18.0, 30.0], &[10.0, 20.0]);
    assert_eq!(errors, vec![-2.0, 2.0]);
}

#[test]
fn test_error_handling() {
    let empty: Vec<f64> = vec![];
    assert!(forecast_accuracy(&empty, &empty).is_err());
    assert!(forecast_accuracy(&[1.0, 2.0], &[1.0]).is_err());
}

#[test]
fn test_mape_matches_accuracy() {
    let forecast = [110.0, 190.0, 0.0];
    let actual = [100.0, 200.0, 0.0];

    let mape = mean_absolute_percentage_error(&forecast, &actual).unwrap();
    assert_relative_eq!(mape, (10.0 + 5.0) / 3.0);
    assert_relative_eq!(forecast_accuracy(&forecast, &actual).unwrap().mape, mape);

    assert!(mean_absolute_percentage_error(&[], &[]).is_err());
}

#[test]
fn test_accuracy_display() {
    let text = forecast_accuracy(&[12.0], &[10.0]).unwrap().to_string();
    assert!(text.starts_with("Forecast Accuracy Metrics:"));
    assert!(text.contains("MAE"));
    assert!(text.contains("20.0000%"));
}
