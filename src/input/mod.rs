mod folder;

pub use folder::{is_supported_image, list_images, SUPPORTED_EXTENSIONS};

use crate::error::{ConvertError, Result};
use image::RgbImage;
use std::path::Path;

/// Decode an image file into an RGB pixel grid
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).map_err(|source| ConvertError::ImageLoadFailure {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );

    Ok(image.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let err = load_image(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, ConvertError::ImageLoadFailure { .. }));
    }

    #[test]
    fn test_load_roundtrip_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        RgbImage::from_pixel(4, 3, image::Rgb([255, 0, 0]))
            .save(&path)
            .unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.get_pixel(0, 0).0, [255, 0, 0]);
    }
}
