pub mod air_quality_frame;
pub mod color_bucket;
pub mod filter_selection;
pub mod measurement;
pub mod observation;
pub mod station;
