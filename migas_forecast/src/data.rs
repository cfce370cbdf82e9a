//! Monthly series loading and preprocessing

use crate::config::ColumnNames;
use crate::error::{ForecastError, InvalidRow, Result};
use calamine::{open_workbook_auto, Range, Reader};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// Data loader for raw monthly tables
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a raw table from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        tracing::debug!(rows = df.height(), columns = df.width(), "loaded csv table");
        Ok(df)
    }

    /// Load the first worksheet of an Excel or OpenDocument workbook.
    ///
    /// The first row is the header. Every column comes back as text and is
    /// coerced during preprocessing.
    pub fn from_excel<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let mut workbook = open_workbook_auto(path)?;
        let sheet = workbook.worksheet_range_at(0).ok_or_else(|| {
            ForecastError::ExcelError("workbook has no worksheets".to_string())
        })??;

        let df = frame_from_sheet(&sheet)?;
        tracing::debug!(rows = df.height(), columns = df.width(), "loaded worksheet");
        Ok(df)
    }

    /// Load a table, picking the reader from the file extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xls" | "ods") => Self::from_excel(path),
            _ => Self::from_csv(path),
        }
    }

    /// Load a CSV file and preprocess it into a clean series
    pub fn series_from_csv<P: AsRef<Path>>(
        path: P,
        columns: &ColumnNames,
    ) -> Result<CleanSeries> {
        let df = Self::from_csv(path)?;
        preprocess(&df, columns)
    }
}

/// Build a text-typed frame from a worksheet whose first row is the header
fn frame_from_sheet(sheet: &Range<calamine::DataType>) -> Result<DataFrame> {
    let mut rows = sheet.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect(),
        None => return Ok(DataFrame::default()),
    };

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); header.len()];
    for cells in rows {
        for (i, column) in columns.iter_mut().enumerate() {
            column.push(cells.get(i).and_then(cell_text));
        }
    }

    let series = header
        .iter()
        .zip(columns)
        .map(|(name, values)| Series::new(name, values))
        .collect::<Vec<_>>();
    Ok(DataFrame::new(series)?)
}

fn cell_text(cell: &calamine::DataType) -> Option<String> {
    use calamine::DataType as Cell;

    match cell {
        Cell::String(s) => Some(s.clone()),
        Cell::Float(v) | Cell::DateTime(v) => Some(v.to_string()),
        Cell::Int(v) => Some(v.to_string()),
        Cell::Bool(v) => Some(v.to_string()),
        _ => None,
    }
}

/// Date-ordered monthly values, one per row of the input table
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CleanSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl CleanSeries {
    /// Create a series from parallel dates and values.
    ///
    /// Dates must be non-decreasing. Repeated dates are allowed.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::ValidationError(format!(
                "Dates length ({}) doesn't match values length ({})",
                dates.len(),
                values.len()
            )));
        }

        if dates.windows(2).any(|w| w[0] > w[1]) {
            return Err(ForecastError::ValidationError(
                "Dates must be in ascending order".to_string(),
            ));
        }

        Ok(Self { dates, values })
    }

    /// Get the dates
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Get the values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over (date, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Get a slice of the series from start to end index
    pub fn slice(&self, start: usize, end: Option<usize>) -> Result<Self> {
        let end = end.unwrap_or(self.len());
        if start > end || end > self.len() {
            return Err(ForecastError::ValidationError(format!(
                "Slice {}..{} out of bounds for series of length {}",
                start,
                end,
                self.len()
            )));
        }

        Ok(Self {
            dates: self.dates[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        })
    }

    /// Split into the first `at` observations and the rest
    pub fn split_at(&self, at: usize) -> Result<(Self, Self)> {
        Ok((self.slice(0, Some(at))?, self.slice(at, None)?))
    }
}

/// Validate a raw table and turn it into a clean monthly series.
///
/// Checks run in order and stop at the first failure: required columns,
/// numeric year and month, month range, calendar date, numeric value. Rows
/// are then ordered by date; rows sharing a date keep their input order.
pub fn preprocess(df: &DataFrame, columns: &ColumnNames) -> Result<CleanSeries> {
    check_schema(df, columns)?;

    let years = numeric_column(df, &columns.year)?;
    let months = numeric_column(df, &columns.month)?;

    let non_numeric: Vec<usize> = years
        .iter()
        .zip(months.iter())
        .enumerate()
        .filter(|(_, (y, m))| y.is_none() || m.is_none())
        .map(|(i, _)| i)
        .collect();
    if !non_numeric.is_empty() {
        return Err(ForecastError::DataType {
            columns: vec![columns.year.clone(), columns.month.clone()],
            rows: describe_rows(
                df,
                &non_numeric,
                &[columns.year.as_str(), columns.month.as_str()],
            )?,
        });
    }

    // Every entry is present past this point
    let years: Vec<f64> = years.into_iter().flatten().collect();
    let months: Vec<f64> = months.into_iter().flatten().collect();

    let out_of_range: Vec<usize> = months
        .iter()
        .enumerate()
        .filter(|(_, m)| !(1.0..=12.0).contains(*m))
        .map(|(i, _)| i)
        .collect();
    if !out_of_range.is_empty() {
        return Err(ForecastError::Range {
            rows: describe_rows(df, &out_of_range, &[columns.month.as_str()])?,
        });
    }

    let dates = years
        .iter()
        .zip(months.iter())
        .enumerate()
        .map(|(row, (&year, &month))| month_start(row, year, month))
        .collect::<Result<Vec<NaiveDate>>>()?;

    let values = numeric_column(df, &columns.value)?;
    let missing_values: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !matches!(v, Some(x) if x.is_finite()))
        .map(|(i, _)| i)
        .collect();
    if !missing_values.is_empty() {
        return Err(ForecastError::DataType {
            columns: vec![columns.value.clone()],
            rows: describe_rows(df, &missing_values, &[columns.value.as_str()])?,
        });
    }
    let values: Vec<f64> = values.into_iter().flatten().collect();

    let mut rows: Vec<(NaiveDate, f64)> = dates.into_iter().zip(values).collect();
    rows.sort_by_key(|(date, _)| *date);
    let (dates, values): (Vec<NaiveDate>, Vec<f64>) = rows.into_iter().unzip();

    tracing::info!(rows = values.len(), "preprocessed monthly series");
    CleanSeries::new(dates, values)
}

fn check_schema(df: &DataFrame, columns: &ColumnNames) -> Result<()> {
    let present = df.get_column_names();
    let missing: Vec<String> = columns
        .required()
        .iter()
        .copied()
        .filter(|name| !present.contains(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ForecastError::Schema { missing })
    }
}

/// Coerce a column to f64. Text cells are trimmed first; unparsable cells,
/// nulls and NaN become `None`.
fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name)?;
    let series = match column.dtype() {
        DataType::Utf8 => {
            let trimmed: Utf8Chunked = column
                .utf8()?
                .into_iter()
                .map(|v| v.map(str::trim))
                .collect();
            trimmed.into_series().cast(&DataType::Float64)?
        }
        _ => column.cast(&DataType::Float64)?,
    };
    let values = series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

/// Raw cell text of a column, for error messages
fn raw_cells(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let series = df.column(name)?.cast(&DataType::Utf8)?;
    let cells = series
        .utf8()?
        .into_iter()
        .map(|v| v.unwrap_or("null").to_string())
        .collect();
    Ok(cells)
}

fn describe_rows(df: &DataFrame, rows: &[usize], names: &[&str]) -> Result<Vec<InvalidRow>> {
    let cells = names
        .iter()
        .map(|name| raw_cells(df, name))
        .collect::<Result<Vec<_>>>()?;

    Ok(rows
        .iter()
        .map(|&row| InvalidRow {
            row,
            cells: names
                .iter()
                .zip(cells.iter())
                .map(|(name, column)| format!("{}={}", name, column[row]))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect())
}

/// First day of the month, rejecting fractional or out-of-calendar values
fn month_start(row: usize, year: f64, month: f64) -> Result<NaiveDate> {
    let error = || ForecastError::DateConstruction { row, year, month };

    if year.fract() != 0.0 || month.fract() != 0.0 {
        return Err(error());
    }
    if year < i32::MIN as f64 || year > i32::MAX as f64 {
        return Err(error());
    }

    NaiveDate::from_ymd_opt(year as i32, month as u32, 1).ok_or_else(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_start() {
        assert_eq!(
            month_start(0, 2021.0, 3.0).unwrap(),
            NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()
        );
        assert!(month_start(0, 2021.5, 3.0).is_err());
        assert!(month_start(0, 2021.0, 3.25).is_err());
        assert!(month_start(4, 1.0e12, 3.0).is_err());
    }

    #[test]
    fn test_clean_series_rejects_unordered_dates() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        ];
        assert!(CleanSeries::new(dates, vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn test_numeric_column_trims_text() {
        let df = df!("Value" => &[" 12", "3.5 ", "\t7\n", "x 1"]).unwrap();
        assert_eq!(
            numeric_column(&df, "Value").unwrap(),
            vec![Some(12.0), Some(3.5), Some(7.0), None]
        );
    }

    #[test]
    fn test_frame_from_sheet() {
        use calamine::DataType as Cell;

        let mut sheet = Range::new((0, 0), (2, 2));
        sheet.set_value((0, 0), Cell::String("Year".to_string()));
        sheet.set_value((0, 1), Cell::String("Month".to_string()));
        sheet.set_value((0, 2), Cell::String("Import Value".to_string()));
        sheet.set_value((1, 0), Cell::Float(2021.0));
        sheet.set_value((1, 1), Cell::Int(2));
        sheet.set_value((1, 2), Cell::Float(1850.5));
        sheet.set_value((2, 0), Cell::String(" 2021".to_string()));
        sheet.set_value((2, 1), Cell::Int(1));
        sheet.set_value((2, 2), Cell::Float(1700.0));

        let df = frame_from_sheet(&sheet).unwrap();
        assert_eq!(df.get_column_names(), vec!["Year", "Month", "Import Value"]);
        assert_eq!(df.height(), 2);

        let series = preprocess(&df, &ColumnNames::default()).unwrap();
        assert_eq!(series.values(), &[1700.0, 1850.5]);
        assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2021, 1, 1));
    }

    #[test]
    fn test_frame_from_sheet_with_empty_cells() {
        use calamine::DataType as Cell;

        let mut sheet = Range::new((0, 0), (1, 1));
        sheet.set_value((0, 0), Cell::String("Year".to_string()));
        sheet.set_value((0, 1), Cell::String("Month".to_string()));
        sheet.set_value((1, 0), Cell::Float(2021.0));

        let df = frame_from_sheet(&sheet).unwrap();
        assert_eq!(df.column("Month").unwrap().null_count(), 1);
    }

    #[test]
    fn test_split_at() {
        let dates = (1..=5)
            .map(|m| NaiveDate::from_ymd_opt(2022, m, 1).unwrap())
            .collect();
        let series = CleanSeries::new(dates, vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        let (train, test) = series.split_at(4).unwrap();
        assert_eq!(train.values(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(test.values(), &[5.0]);
        assert_eq!(test.first_date(), NaiveDate::from_ymd_opt(2022, 5, 1));
        assert!(series.split_at(6).is_err());
    }
}
