use crate::error::Result;
use image::{GrayImage, RgbImage, RgbaImage};
use imageproc::geometry::contour_area;
use imageproc::point::Point;

/// Binary foreground mask: 255 = foreground, 0 = background.
/// Dimensions match the (downscaled) working image.
pub type Mask = GrayImage;

/// Outer contour of one foreground region, in pixel space
/// (origin top-left, y down). The last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryPolygon {
    points: Vec<[u32; 2]>,
}

impl BoundaryPolygon {
    pub fn new(points: Vec<[u32; 2]>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[[u32; 2]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Outline as imageproc points
    pub fn contour(&self) -> Vec<Point<u32>> {
        self.points.iter().map(|&[x, y]| Point::new(x, y)).collect()
    }

    /// Enclosed area, zero for fewer than three points
    pub fn area(&self) -> f64 {
        contour_area(&self.contour())
    }
}

/// Result of segmenting one image
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Working copy of the image with the mask written into its alpha channel
    pub texture: RgbaImage,
    pub mask: Mask,
    pub polygon: BoundaryPolygon,
}

impl Segmentation {
    /// Pixel dimensions the polygon coordinates refer to
    ///
    /// Returns (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.mask.dimensions()
    }
}

/// Trait for foreground segmenters
/// Any backend producing the largest external contour plus a matching mask fits here
pub trait Segmenter {
    /// Find the dominant foreground object in an RGB image
    ///
    /// # Arguments
    /// * `image` - Decoded input image at its original resolution
    ///
    /// # Returns
    /// * Texture, mask and boundary polygon, all at the working resolution
    fn segment(&self, image: &RgbImage) -> Result<Segmentation>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_area() {
        let square = BoundaryPolygon::new(vec![[0, 0], [10, 0], [10, 10], [0, 10]]);
        assert_eq!(square.area(), 100.0);
    }

    #[test]
    fn test_area_ignores_orientation() {
        let cw = BoundaryPolygon::new(vec![[0, 0], [0, 4], [3, 0]]);
        let ccw = BoundaryPolygon::new(vec![[0, 0], [3, 0], [0, 4]]);
        assert_eq!(cw.area(), 6.0);
        assert_eq!(ccw.area(), 6.0);
    }

    #[test]
    fn test_contour_keeps_order() {
        let polygon = BoundaryPolygon::new(vec![[4, 1], [9, 1], [9, 6]]);
        assert_eq!(
            polygon.contour(),
            vec![Point::new(4, 1), Point::new(9, 1), Point::new(9, 6)]
        );
    }

    #[test]
    fn test_degenerate_area_is_zero() {
        assert_eq!(BoundaryPolygon::new(vec![[1, 1], [2, 2]]).area(), 0.0);
        assert_eq!(BoundaryPolygon::new(Vec::new()).area(), 0.0);
    }
}
