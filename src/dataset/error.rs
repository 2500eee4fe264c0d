use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open dataset file '{}'", .0.display())]
    FileOpen(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse CSV dataset '{}'", .0.display())]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Required column '{column}' not found in dataset")]
    MissingColumn { column: String },

    #[error("Column '{column}' has type {found}, expected {expected}")]
    InvalidColumnType {
        column: String,
        expected: String,
        found: String,
    },

    #[error("Row {row} has no station name")]
    MissingStation { row: usize },

    #[error("Row {row} has no value in time column '{column}'")]
    MissingTimePart { column: String, row: usize },

    #[error("Row {row} does not form a valid timestamp: {year:04}-{month:02}-{day:02} {hour:02}:00")]
    InvalidTimestamp {
        row: usize,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
