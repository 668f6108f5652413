use super::types::{BoundaryPolygon, Mask};
use crate::config::ContourMode;
use imageproc::contours::{find_contours, BorderType};
use imageproc::geometry::contour_area;

/// Trace all external contours of a mask and keep the one enclosing the largest area
///
/// Holes and regions nested inside holes are ignored. Ties keep the contour
/// traced first (raster order of its starting pixel).
pub fn largest_external_contour(mask: &Mask, mode: ContourMode) -> Option<BoundaryPolygon> {
    let _span = tracing::debug_span!("contours").entered();

    let contours = find_contours::<u32>(mask);
    tracing::debug!("Traced {} contours", contours.len());

    let mut best: Option<(f64, BoundaryPolygon)> = None;
    for contour in contours {
        if !matches!(contour.border_type, BorderType::Outer) || contour.parent.is_some() {
            continue;
        }

        let area = contour_area(&contour.points);
        if best.as_ref().map_or(false, |(best_area, _)| area <= *best_area) {
            continue;
        }

        let points: Vec<[u32; 2]> = contour.points.iter().map(|p| [p.x, p.y]).collect();
        let points = match mode {
            ContourMode::Simple => compress_chain(&points),
            ContourMode::Full => points,
        };
        best = Some((area, BoundaryPolygon::new(points)));
    }

    best.map(|(_, polygon)| polygon)
}

/// Drop points lying inside straight runs of the chain
///
/// A point survives only when the step arriving at it differs from the step
/// leaving it, so horizontal, vertical and diagonal runs collapse to their end
/// points. The enclosed shape is unchanged.
pub fn compress_chain(points: &[[u32; 2]]) -> Vec<[u32; 2]> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let curr = points[i];
            let next = points[(i + 1) % n];
            step(prev, curr) != step(curr, next)
        })
        .map(|i| points[i])
        .collect()
}

fn step(from: [u32; 2], to: [u32; 2]) -> (i64, i64) {
    (
        (to[0] as i64 - from[0] as i64).signum(),
        (to[1] as i64 - from[1] as i64).signum(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn mask_with_rect(width: u32, height: u32, x0: u32, y0: u32, w: u32, h: u32) -> Mask {
        Mask::from_fn(width, height, |x, y| {
            if x >= x0 && x < x0 + w && y >= y0 && y < y0 + h {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }

    #[test]
    fn test_compress_straight_runs() {
        let ring = vec![
            [0, 0],
            [1, 0],
            [2, 0],
            [2, 1],
            [2, 2],
            [1, 2],
            [0, 2],
            [0, 1],
        ];
        assert_eq!(compress_chain(&ring), vec![[0, 0], [2, 0], [2, 2], [0, 2]]);
    }

    #[test]
    fn test_compress_keeps_diagonal_ends() {
        let ring = vec![[0, 0], [1, 1], [2, 2], [1, 2], [0, 2], [0, 1]];
        assert_eq!(compress_chain(&ring), vec![[0, 0], [2, 2], [0, 2]]);
    }

    #[test]
    fn test_compress_short_chain_untouched() {
        assert_eq!(compress_chain(&[[3, 3]]), vec![[3, 3]]);
        assert_eq!(compress_chain(&[[0, 0], [1, 0]]), vec![[0, 0], [1, 0]]);
    }

    #[test]
    fn test_square_traces_to_four_corners() {
        let mask = mask_with_rect(100, 100, 25, 25, 50, 50);
        let polygon = largest_external_contour(&mask, ContourMode::Simple).unwrap();

        assert_eq!(polygon.len(), 4);
        let mut corners = polygon.points().to_vec();
        corners.sort();
        assert_eq!(corners, vec![[25, 25], [25, 74], [74, 25], [74, 74]]);
    }

    #[test]
    fn test_full_mode_keeps_every_border_pixel() {
        let mask = mask_with_rect(20, 20, 5, 5, 4, 4);
        let polygon = largest_external_contour(&mask, ContourMode::Full).unwrap();
        // 4x4 block has 12 border pixels
        assert_eq!(polygon.len(), 12);
    }

    #[test]
    fn test_largest_region_wins() {
        let mut mask = mask_with_rect(60, 60, 2, 2, 5, 5);
        for y in 20..50 {
            for x in 20..40 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }

        let polygon = largest_external_contour(&mask, ContourMode::Simple).unwrap();
        let xs: Vec<u32> = polygon.points().iter().map(|p| p[0]).collect();
        assert!(xs.iter().all(|&x| (20..40).contains(&x)));
    }

    #[test]
    fn test_empty_mask_has_no_contour() {
        let mask = Mask::new(10, 10);
        assert!(largest_external_contour(&mask, ContourMode::Simple).is_none());
    }
}
