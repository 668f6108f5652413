mod triangulate;

pub use triangulate::{
    create_triangulator, EarClipTriangulator, FanTriangulator, Triangulator,
};

use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::segmentation::BoundaryPolygon;
use bytemuck::{Pod, Zeroable};

/// Flat vertex colour until per-vertex colouring is sampled from the texture
pub const VERTEX_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Interleaved vertex: position then RGBA colour, 28 bytes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 3]>();
}

/// Closed prism: front cap, back cap and side walls
#[derive(Debug, Clone)]
pub struct ExtrudedMesh {
    /// N front vertices (z = 0) followed by N back vertices (z = -height)
    pub vertices: Vec<Vertex>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u16>,
}

impl ExtrudedMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Per-axis (min, max) over vertex positions
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];

        for vertex in &self.vertices {
            for axis in 0..3 {
                min[axis] = min[axis].min(vertex.position[axis]);
                max[axis] = max[axis].max(vertex.position[axis]);
            }
        }

        (min, max)
    }
}

/// Map a pixel coordinate into the centred model square [-0.5, 0.5]², y up
pub fn normalize_point([x, y]: [u32; 2], width: u32, height: u32) -> [f32; 2] {
    let nx = x as f64 / width as f64 - 0.5;
    let ny = 0.5 - y as f64 / height as f64;
    [nx as f32, ny as f32]
}

/// Extrudes a boundary polygon into a prism
pub struct MeshBuilder {
    depth: f32,
    index_limit: usize,
    triangulator: Box<dyn Triangulator + Send + Sync>,
}

impl MeshBuilder {
    pub fn new(config: &ConvertConfig) -> Self {
        Self {
            depth: config.height,
            index_limit: config.max_index_count.min(ConvertConfig::U16_INDEX_LIMIT),
            triangulator: create_triangulator(config.triangulation),
        }
    }

    /// Build the prism for a polygon traced in a `width` x `height` pixel image
    pub fn build(&self, polygon: &BoundaryPolygon, width: u32, height: u32) -> Result<ExtrudedMesh> {
        let _span = tracing::debug_span!("extrude").entered();

        if !self.depth.is_finite() || self.depth <= 0.0 {
            return Err(ConvertError::InvalidHeight(self.depth));
        }

        let n = polygon.len();
        if n < 3 {
            return Err(ConvertError::DegeneratePolygon { points: n });
        }
        if 2 * n > self.index_limit {
            return Err(ConvertError::IndexOverflow {
                vertices: 2 * n,
                limit: self.index_limit,
            });
        }

        let flat: Vec<[f32; 2]> = polygon
            .points()
            .iter()
            .map(|&p| normalize_point(p, width, height))
            .collect();

        let mut vertices = Vec::with_capacity(2 * n);
        for z in [0.0, -self.depth] {
            vertices.extend(flat.iter().map(|&[x, y]| Vertex {
                position: [x, y, z],
                color: VERTEX_COLOR,
            }));
        }

        let cap_points: Vec<[f64; 2]> = polygon
            .points()
            .iter()
            .map(|&[x, y]| [x as f64, y as f64])
            .collect();
        let front = self.triangulator.triangulate(&cap_points);

        // Limit check above keeps every index within u16
        let n = n as u16;
        let mut indices = Vec::with_capacity(front.len() * 6 + n as usize * 6);

        for &[a, b, c] in &front {
            indices.extend_from_slice(&[a as u16, b as u16, c as u16]);
        }
        for &[a, b, c] in &front {
            indices.extend_from_slice(&[n + a as u16, n + c as u16, n + b as u16]);
        }
        for i in 0..n {
            let next = (i + 1) % n;
            indices.extend_from_slice(&[i, next, n + i]);
            indices.extend_from_slice(&[next, n + next, n + i]);
        }

        tracing::debug!(
            "Extruded {} points into {} vertices, {} triangles",
            n,
            vertices.len(),
            indices.len() / 3
        );

        Ok(ExtrudedMesh { vertices, indices })
    }
}
