use super::types::Mask;
use image::{imageops, Luma, RgbImage, Rgba, RgbaImage};

/// Preprocessor for turning a decoded photo into a working image and mask
pub struct Preprocessor {
    max_dimension: u32,
    threshold: u8,
}

impl Preprocessor {
    pub fn new(max_dimension: u32, threshold: u8) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
            threshold,
        }
    }

    /// Uniformly downscale so the longer side is at most `max_dimension`
    ///
    /// Images already within bounds are returned unchanged.
    pub fn downscale(&self, image: &RgbImage) -> RgbImage {
        let _span = tracing::debug_span!("downscale").entered();

        let (width, height) = image.dimensions();
        let longest = width.max(height);
        if longest <= self.max_dimension {
            return image.clone();
        }

        let scale = self.max_dimension as f64 / longest as f64;
        let target_width = ((width as f64 * scale) as u32).max(1);
        let target_height = ((height as f64 * scale) as u32).max(1);

        tracing::debug!(
            "Resizing {}x{} -> {}x{}",
            width,
            height,
            target_width,
            target_height
        );

        imageops::resize(
            image,
            target_width,
            target_height,
            imageops::FilterType::Triangle,
        )
    }

    /// Inverse binary threshold on the luma channel
    ///
    /// Pixels at or below the threshold become 255 (foreground), brighter ones 0.
    pub fn threshold_mask(&self, image: &RgbImage) -> Mask {
        let _span = tracing::debug_span!("threshold").entered();

        let mut mask = imageops::grayscale(image);
        for pixel in mask.pixels_mut() {
            *pixel = if pixel[0] <= self.threshold {
                Luma([255])
            } else {
                Luma([0])
            };
        }
        mask
    }

    /// Copy the image into RGBA with the mask as alpha
    pub fn apply_alpha(image: &RgbImage, mask: &Mask) -> RgbaImage {
        RgbaImage::from_fn(image.width(), image.height(), |x, y| {
            let [r, g, b] = image.get_pixel(x, y).0;
            Rgba([r, g, b, mask.get_pixel(x, y)[0]])
        })
    }

    /// Number of foreground pixels in a mask
    pub fn foreground_count(mask: &Mask) -> usize {
        mask.pixels().filter(|p| p[0] != 0).count()
    }
}
