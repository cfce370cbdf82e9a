use fts_core::CoreError;
use migas_forecast::error::{ForecastError, InvalidRow};
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    let core_error = CoreError::InsufficientHistory { needed: 3, got: 2 };
    let forecast_error = ForecastError::from(core_error);
    assert!(matches!(
        forecast_error,
        ForecastError::InsufficientHistory { needed: 3, got: 2 }
    ));

    let core_error = CoreError::InvalidInput("Order must be at least 1".to_string());
    assert!(matches!(
        ForecastError::from(core_error),
        ForecastError::InvalidParameter(_)
    ));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(
        ForecastError::from(json_error),
        ForecastError::JsonError(_)
    ));
}

#[test]
fn test_error_display() {
    let error = ForecastError::Schema {
        missing: vec!["Month".to_string(), "Import Value".to_string()],
    };
    assert_eq!(
        error.to_string(),
        "Schema error: missing columns: Month, Import Value"
    );

    let error = ForecastError::DataType {
        columns: vec!["Year".to_string(), "Month".to_string()],
        rows: vec![
            InvalidRow {
                row: 2,
                cells: "Year=2020, Month=abc".to_string(),
            },
            InvalidRow {
                row: 5,
                cells: "Year=null, Month=4".to_string(),
            },
        ],
    };
    assert_eq!(
        error.to_string(),
        "Data type error: column 'Year' or 'Month' contains non-numeric or null values: \
         row 2: Year=2020, Month=abc; row 5: Year=null, Month=4"
    );

    let error = ForecastError::Range {
        rows: vec![InvalidRow {
            row: 0,
            cells: "Month=13".to_string(),
        }],
    };
    assert_eq!(
        error.to_string(),
        "Range error: month must be between 1 and 12: row 0: Month=13"
    );

    let error = ForecastError::DateConstruction {
        row: 1,
        year: 2020.5,
        month: 2.0,
    };
    assert_eq!(
        error.to_string(),
        "Date construction error at row 1: year 2020.5, month 2"
    );

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}
