//! Column names of the air-quality table and the schema checks applied when a
//! frame is admitted into the pipeline.

use crate::dataset::error::DatasetError;
use crate::types::measurement::Measurement;
use polars::prelude::*;

pub const COL_STATION: &str = "station";
pub const COL_YEAR: &str = "year";
pub const COL_MONTH: &str = "month";
pub const COL_DAY: &str = "day";
pub const COL_HOUR: &str = "hour";

// Derived
pub const COL_DATETIME: &str = "datetime";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";

/// Integer columns composed into the `datetime` column, in composition order.
pub const TIME_PART_COLUMNS: [&str; 4] = [COL_YEAR, COL_MONTH, COL_DAY, COL_HOUR];

/// Every column the loader requires, in the order of the source file.
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![COL_STATION];
    columns.extend(TIME_PART_COLUMNS);
    columns.extend(Measurement::ALL.iter().map(|m| m.column_name()));
    columns
}

fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, DatasetError> {
    df.column(name).map_err(|_| DatasetError::MissingColumn {
        column: name.to_string(),
    })
}

fn mistyped(column: &str, expected: &str, found: &DataType) -> DatasetError {
    DatasetError::InvalidColumnType {
        column: column.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

/// Checks presence and dtype of every required column.
///
/// * `station` must be a string column with a name on every row.
/// * Time parts must have an integer dtype; a float or string `month` column
///   means the file holds values that cannot be composed into a timestamp.
/// * Readings may be any integer or float dtype, or `Null` when a column is
///   entirely missing.
pub fn validate(df: &DataFrame) -> Result<(), DatasetError> {
    let station = get_column(df, COL_STATION)?;
    if !matches!(station.dtype(), DataType::String) {
        return Err(mistyped(COL_STATION, "string", station.dtype()));
    }
    if let Some(row) = station.str()?.into_iter().position(|name| name.is_none()) {
        return Err(DatasetError::MissingStation { row });
    }

    for name in TIME_PART_COLUMNS {
        let column = get_column(df, name)?;
        if !column.dtype().is_integer() {
            return Err(mistyped(name, "integer", column.dtype()));
        }
    }

    for measurement in Measurement::ALL {
        let name = measurement.column_name();
        let column = get_column(df, name)?;
        let dtype = column.dtype();
        let numeric = dtype.is_integer()
            || matches!(dtype, DataType::Float32 | DataType::Float64 | DataType::Null);
        if !numeric {
            return Err(mistyped(name, "numeric", dtype));
        }
    }
    Ok(())
}

/// Expressions casting the validated columns to their canonical dtypes.
///
/// Time parts become `Int32`; readings become `Float64` with `NaN` turned into
/// null so that every aggregate treats it as missing.
pub fn normalize_exprs() -> Vec<Expr> {
    let mut exprs: Vec<Expr> = TIME_PART_COLUMNS
        .iter()
        .map(|name| col(*name).strict_cast(DataType::Int32))
        .collect();
    exprs.extend(Measurement::ALL.iter().map(|m| {
        col(m.column_name())
            .cast(DataType::Float64)
            .fill_nan(lit(NULL))
            .cast(DataType::Float64)
    }));
    exprs
}
