use crate::dataset::error::DatasetError;
use crate::types::air_quality_frame::AirQualityFrame;
use crate::types::measurement::Measurement;
use bon::bon;
use log::{debug, info, warn};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Relative path the dashboard loads its dataset from when none is given.
pub const DEFAULT_DATASET_PATH: &str = "all_data.csv";

/// Cell text marking a missing value in the source file.
const MISSING_VALUE: &str = "NA";

/// Reads the air-quality CSV into a validated [`AirQualityFrame`].
///
/// The load is atomic: either every row is parsed, validated and given a
/// `datetime`, or an error is returned and nothing is kept.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    path: PathBuf,
    delimiter: u8,
}

#[bon]
impl DatasetLoader {
    /// Creates a loader.
    ///
    /// * `.path(..)`: optional, defaults to [`DEFAULT_DATASET_PATH`].
    /// * `.delimiter(u8)`: optional field separator, defaults to `b','`.
    #[builder]
    pub fn new(#[builder(into)] path: Option<PathBuf>, delimiter: Option<u8>) -> Self {
        Self {
            path: path.unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH)),
            delimiter: delimiter.unwrap_or(b','),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads, validates and timestamps the whole file.
    ///
    /// # Errors
    ///
    /// * [`DatasetError::FileOpen`] if the file does not exist or cannot be read.
    /// * [`DatasetError::CsvRead`] if the file is not parseable as CSV, or a
    ///   reading cell holds non-numeric text.
    /// * Any schema or timestamp error from [`AirQualityFrame::try_from_dataframe`].
    pub fn load(&self) -> Result<AirQualityFrame, DatasetError> {
        std::fs::metadata(&self.path).map_err(|e| {
            warn!("Dataset file {:?} is not accessible: {}", self.path, e);
            DatasetError::FileOpen(self.path.clone(), e)
        })?;

        debug!("Reading dataset from {:?}", self.path);
        let delimiter = self.delimiter;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_schema_overwrite(Some(Arc::new(reading_schema())))
            .map_parse_options(|opts| {
                opts.with_separator(delimiter)
                    .with_null_values(Some(NullValues::AllColumnsSingle(MISSING_VALUE.into())))
            })
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .map_err(|e| DatasetError::CsvRead(self.path.clone(), e))?
            .finish()
            .map_err(|e| DatasetError::CsvRead(self.path.clone(), e))?;

        let frame = AirQualityFrame::try_from_dataframe(df).map_err(|e| {
            warn!("Rejected dataset {:?}: {}", self.path, e);
            e
        })?;
        info!(
            "Loaded {} observations from {:?}",
            frame.height(),
            self.path
        );
        Ok(frame)
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Readings are always parsed as `Float64`, so a column that is entirely `NA`
/// does not get inferred as a string column.
fn reading_schema() -> Schema {
    let mut schema = Schema::with_capacity(Measurement::ALL.len());
    for measurement in Measurement::ALL {
        schema.with_column(measurement.column_name().into(), DataType::Float64);
    }
    schema
}
