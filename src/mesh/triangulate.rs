use crate::config::Triangulation;
use imageproc::geometry::oriented_contour_area;
use imageproc::point::Point;
use rgeometry::algorithms::triangulation::earclip::earclip;
use rgeometry::data::Polygon;

/// Trait for cap triangulation strategies
///
/// Triangles index into the polygon's point list and follow the polygon's own
/// winding, so the front cap faces the same way for every strategy.
pub trait Triangulator {
    fn triangulate(&self, points: &[[f64; 2]]) -> Vec<[u32; 3]>;
}

pub fn create_triangulator(kind: Triangulation) -> Box<dyn Triangulator + Send + Sync> {
    match kind {
        Triangulation::Fan => Box::new(FanTriangulator),
        Triangulation::EarClip => Box::new(EarClipTriangulator),
    }
}

/// Triangle fan anchored at point 0: (0, i, i+1).
/// Concave outlines produce overlapping triangles.
#[derive(Debug, Clone, Copy, Default)]
pub struct FanTriangulator;

impl Triangulator for FanTriangulator {
    fn triangulate(&self, points: &[[f64; 2]]) -> Vec<[u32; 3]> {
        if points.len() < 3 {
            return Vec::new();
        }
        (1..points.len() as u32 - 1)
            .map(|i| [0, i, i + 1])
            .collect()
    }
}

/// Ear clipping for simple polygons, concave ones included
///
/// Points strictly inside a straight run get no cap triangle of their own;
/// they still sit on a cap edge. Outlines that are not simple polygons
/// (a traced one-pixel neck visits the same pixels twice) are capped with a
/// fan instead, with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarClipTriangulator;

impl EarClipTriangulator {
    /// Ear-clip the outline, or `None` if it is not a simple polygon
    pub fn clip(&self, points: &[[f64; 2]]) -> Option<Vec<[u32; 3]>> {
        let area = oriented_contour_area(&to_contour(points));
        if points.len() < 3 || area == 0.0 {
            return None;
        }
        let orientation = area.signum();

        // Counter-clockwise ring of corners
        let mut ring = corner_indices(points);
        if ring.len() < 3 {
            return None;
        }
        if orientation < 0.0 {
            ring.reverse();
        }

        let corners = ring
            .iter()
            .map(|&i| {
                let [x, y] = points[i];
                rgeometry::data::Point::new([x as f32, y as f32])
            })
            .collect();
        let polygon = match Polygon::new(corners) {
            Ok(polygon) => polygon,
            Err(err) => {
                tracing::debug!("Outline rejected as a simple polygon: {:?}", err);
                return None;
            }
        };

        let triangles = earclip(&polygon)
            .map(|(a, b, c)| {
                let triangle = [
                    ring[a.usize()] as u32,
                    ring[b.usize()] as u32,
                    ring[c.usize()] as u32,
                ];
                if triangle_area(points, triangle) * orientation < 0.0 {
                    [triangle[0], triangle[2], triangle[1]]
                } else {
                    triangle
                }
            })
            .collect();

        Some(triangles)
    }
}

impl Triangulator for EarClipTriangulator {
    fn triangulate(&self, points: &[[f64; 2]]) -> Vec<[u32; 3]> {
        if points.len() < 3 {
            return Vec::new();
        }

        self.clip(points).unwrap_or_else(|| {
            tracing::warn!(
                "Outline with {} points is not a simple polygon, capping it with a fan",
                points.len()
            );
            FanTriangulator.triangulate(points)
        })
    }
}

fn to_contour(points: &[[f64; 2]]) -> Vec<Point<f64>> {
    points.iter().map(|&[x, y]| Point::new(x, y)).collect()
}

/// Oriented area of one triangle, same sign convention as its outline
fn triangle_area(points: &[[f64; 2]], [a, b, c]: [u32; 3]) -> f64 {
    oriented_contour_area(&to_contour(&[
        points[a as usize],
        points[b as usize],
        points[c as usize],
    ]))
}

/// Indices of the points where the outline changes direction
fn corner_indices(points: &[[f64; 2]]) -> Vec<usize> {
    let n = points.len();
    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let curr = points[i];
            let next = points[(i + 1) % n];

            let turn = oriented_contour_area(&to_contour(&[prev, curr, next]));
            let ahead = (curr[0] - prev[0]) * (next[0] - curr[0])
                + (curr[1] - prev[1]) * (next[1] - curr[1]);
            turn != 0.0 || ahead <= 0.0
        })
        .collect()
}
