use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a single image from becoming an asset
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("could not load image {path}: {source}")]
    ImageLoadFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no foreground pixels at or below intensity {threshold}")]
    NoForegroundFound { threshold: u8 },

    #[error("boundary polygon has {points} points, at least 3 are needed")]
    DegeneratePolygon { points: usize },

    #[error("{vertices} vertices exceed the index limit of {limit}")]
    IndexOverflow { vertices: usize, limit: usize },

    #[error("extrusion height must be a positive number, got {0}")]
    InvalidHeight(f32),

    #[error("could not encode texture: {0}")]
    TextureEncoding(#[source] image::ImageError),

    #[error("could not serialize asset document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("could not write asset to {path}: {source}")]
    AssetWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
