use crate::aggregation::error::AggregationError;
use crate::dataset::error::DatasetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirQualityError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}
