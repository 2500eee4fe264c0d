mod aggregation;
mod dashboard;
mod dataset;
mod error;
mod filtering;
mod types;

#[cfg(test)]
mod test_fixtures;

pub use error::AirQualityError;

pub use dashboard::*;
pub use dataset::loader::{DatasetLoader, DEFAULT_DATASET_PATH};
pub use dataset::schema::required_columns;
pub use filtering::AirQualityFrameFilterExt;

pub use aggregation::binning::*;
pub use aggregation::correlation::*;
pub use aggregation::markers::*;
pub use aggregation::summary::*;
pub use aggregation::trend::*;

pub use types::air_quality_frame::AirQualityFrame;
pub use types::color_bucket::ColorBucket;
pub use types::filter_selection::FilterSelection;
pub use types::measurement::Measurement;
pub use types::observation::Observation;
pub use types::station::*;

pub use aggregation::error::AggregationError;
pub use dataset::error::DatasetError;
