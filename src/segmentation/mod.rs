mod contour;
mod preprocess;
mod threshold;
pub mod types;

pub use contour::{compress_chain, largest_external_contour};
pub use preprocess::Preprocessor;
pub use threshold::ThresholdSegmenter;
pub use types::{BoundaryPolygon, Mask, Segmentation, Segmenter};

use crate::config::ConvertConfig;

/// Create the default segmenter (brightness threshold)
pub fn create_default_segmenter(config: &ConvertConfig) -> Box<dyn Segmenter + Send + Sync> {
    Box::new(ThresholdSegmenter::new(config))
}
