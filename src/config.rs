/// How the front and back caps are triangulated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Triangulation {
    /// Triangle fan anchored at the first boundary point.
    /// Only correct for convex or near-convex outlines.
    #[default]
    Fan,
    /// Ear clipping, handles simple concave outlines
    EarClip,
}

/// How traced boundary pixels are turned into polygon points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ContourMode {
    /// Collapse straight horizontal, vertical and diagonal runs to their end points
    #[default]
    Simple,
    /// Keep every boundary pixel
    #[value(name = "none")]
    Full,
}

/// Processing context shared by every stage of one conversion
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Extrusion depth in normalized model units
    pub height: f32,
    /// Longest image side after downscaling
    pub max_dimension: u32,
    /// Pixels with intensity at or below this are foreground
    pub threshold: u8,
    /// Largest vertex count addressable by the index type
    pub max_index_count: usize,
    pub triangulation: Triangulation,
    pub contour: ContourMode,
    /// Convert batch images on a worker pool instead of one after another
    pub parallel: bool,
}

impl ConvertConfig {
    /// Vertex limit for 16-bit unsigned indices
    pub const U16_INDEX_LIMIT: usize = u16::MAX as usize + 1;

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            height: 0.2,
            max_dimension: 512,
            threshold: 240,
            max_index_count: Self::U16_INDEX_LIMIT,
            triangulation: Triangulation::Fan,
            contour: ContourMode::Simple,
            parallel: false,
        }
    }
}
