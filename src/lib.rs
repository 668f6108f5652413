//! Turn a photo of an object on a light background into an extruded glTF model.
//!
//! Pipeline, one image at a time:
//!   1. Load and downscale the image, threshold it into a foreground mask
//!   2. Trace the largest external contour
//!   3. Extrude the contour into a closed prism (front cap, back cap, side walls)
//!   4. Pack vertices, indices and the masked texture into a glTF/GLB asset

pub mod config;
pub mod error;
pub mod input;
pub mod mesh;
pub mod output;
pub mod pipeline;
pub mod segmentation;

pub use config::{ContourMode, ConvertConfig, Triangulation};
pub use error::{ConvertError, Result};
pub use output::AssetFormat;
pub use pipeline::{
    batch_convert, convert_image, BatchSummary, ConversionOutcome, ConversionReport, Converter,
};
