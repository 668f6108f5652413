use super::contour::largest_external_contour;
use super::preprocess::Preprocessor;
use super::types::{Segmentation, Segmenter};
use crate::config::{ContourMode, ConvertConfig};
use crate::error::{ConvertError, Result};
use image::RgbImage;

/// Brightness-threshold segmenter for objects photographed on a light background
///
/// Anything at or below the threshold counts as foreground, so dark or
/// saturated backgrounds will not separate.
pub struct ThresholdSegmenter {
    preprocessor: Preprocessor,
    threshold: u8,
    contour: ContourMode,
}

impl ThresholdSegmenter {
    pub fn new(config: &ConvertConfig) -> Self {
        Self {
            preprocessor: Preprocessor::new(config.max_dimension, config.threshold),
            threshold: config.threshold,
            contour: config.contour,
        }
    }
}

impl Segmenter for ThresholdSegmenter {
    fn segment(&self, image: &RgbImage) -> Result<Segmentation> {
        let _span = tracing::debug_span!("threshold_segment").entered();

        let working = self.preprocessor.downscale(image);
        let mask = self.preprocessor.threshold_mask(&working);

        let foreground = Preprocessor::foreground_count(&mask);
        tracing::debug!("{} foreground pixels", foreground);
        if foreground == 0 {
            return Err(ConvertError::NoForegroundFound {
                threshold: self.threshold,
            });
        }

        let polygon = largest_external_contour(&mask, self.contour).ok_or(
            ConvertError::NoForegroundFound {
                threshold: self.threshold,
            },
        )?;
        tracing::debug!(
            "Largest contour: {} points, area {:.1}",
            polygon.len(),
            polygon.area()
        );

        let texture = Preprocessor::apply_alpha(&working, &mask);

        Ok(Segmentation {
            texture,
            mask,
            polygon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn square_on_white(size: u32, square: u32) -> RgbImage {
        let start = (size - square) / 2;
        RgbImage::from_fn(size, size, |x, y| {
            let inside = (start..start + square).contains(&x) && (start..start + square).contains(&y);
            if inside {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn test_white_image_has_no_foreground() {
        let segmenter = ThresholdSegmenter::new(&ConvertConfig::default());
        let image = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));

        let err = segmenter.segment(&image).unwrap_err();
        assert!(matches!(err, ConvertError::NoForegroundFound { threshold: 240 }));
    }

    #[test]
    fn test_centered_square() {
        let segmenter = ThresholdSegmenter::new(&ConvertConfig::default());
        let result = segmenter.segment(&square_on_white(100, 50)).unwrap();

        assert_eq!(result.dimensions(), (100, 100));
        assert_eq!(result.polygon.len(), 4);
        assert_eq!(result.texture.get_pixel(50, 50).0, [0, 0, 0, 255]);
        assert_eq!(result.texture.get_pixel(5, 5).0, [255, 255, 255, 0]);
    }

    #[test]
    fn test_large_image_segmented_at_working_size() {
        let config = ConvertConfig {
            max_dimension: 64,
            ..ConvertConfig::default()
        };
        let segmenter = ThresholdSegmenter::new(&config);
        let result = segmenter.segment(&square_on_white(256, 128)).unwrap();

        assert_eq!(result.dimensions(), (64, 64));
        assert_eq!(result.texture.dimensions(), (64, 64));
        assert!(result
            .polygon
            .points()
            .iter()
            .all(|p| p[0] < 64 && p[1] < 64));
    }

    #[test]
    fn test_low_threshold_rejects_gray_object() {
        let config = ConvertConfig {
            threshold: 50,
            ..ConvertConfig::default()
        };
        let segmenter = ThresholdSegmenter::new(&config);
        let image = RgbImage::from_fn(20, 20, |x, _| {
            if x < 10 {
                Rgb([128, 128, 128])
            } else {
                Rgb([255, 255, 255])
            }
        });

        assert!(segmenter.segment(&image).is_err());
    }
}
