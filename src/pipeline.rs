use crate::config::ConvertConfig;
use crate::error::Result;
use crate::input::{list_images, load_image};
use crate::mesh::MeshBuilder;
use crate::output::{pack_asset, AssetFormat, AssetSink, FileSink};
use crate::segmentation::{create_default_segmenter, Segmenter};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// What a successful conversion produced
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub width: u32,
    pub height: u32,
    pub boundary_points: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub elapsed: Duration,
}

/// Result of one image at the pipeline boundary
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    pub success: bool,
    pub message: String,
    pub report: Option<ConversionReport>,
}

/// Aggregate result of a folder conversion
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub total: usize,
    /// Per input image, in file name order
    pub outcomes: Vec<(PathBuf, ConversionOutcome)>,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }
}

/// Segment → extrude → pack, for one image at a time
///
/// Holds no per-image state, so one converter serves a whole batch, in
/// parallel if needed.
pub struct Converter {
    segmenter: Box<dyn Segmenter + Send + Sync>,
    mesh_builder: MeshBuilder,
}

impl Converter {
    pub fn new(config: &ConvertConfig) -> Self {
        Self {
            segmenter: create_default_segmenter(config),
            mesh_builder: MeshBuilder::new(config),
        }
    }

    /// Convert one image, surfacing the first stage failure
    pub fn convert(&self, input: &Path, output: &Path) -> Result<ConversionReport> {
        let _span = tracing::debug_span!("convert", input = %input.display()).entered();
        let start = Instant::now();

        let image = load_image(input)?;
        let segmentation = self.segmenter.segment(&image)?;
        let (width, height) = segmentation.dimensions();

        let mesh = self
            .mesh_builder
            .build(&segmentation.polygon, width, height)?;

        let asset = pack_asset(&mesh, &segmentation.texture, AssetFormat::from_path(output))?;
        FileSink::new(output).write_asset(&asset)?;

        Ok(ConversionReport {
            width,
            height,
            boundary_points: segmentation.polygon.len(),
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            elapsed: start.elapsed(),
        })
    }

    /// Convert one image and turn any failure into a reported outcome
    pub fn convert_reported(&self, input: &Path, output: &Path) -> ConversionOutcome {
        tracing::info!("Processing {}...", input.display());

        match self.convert(input, output) {
            Ok(report) => {
                tracing::debug!(
                    "{}x{}, {} boundary points, {} vertices, {} triangles in {:.1}ms",
                    report.width,
                    report.height,
                    report.boundary_points,
                    report.vertices,
                    report.triangles,
                    report.elapsed.as_secs_f64() * 1000.0
                );
                let message = format!("Successfully created 3D model: {}", output.display());
                tracing::info!("{}", message);
                ConversionOutcome {
                    success: true,
                    message,
                    report: Some(report),
                }
            }
            Err(err) => {
                let message = format!("Failed to convert {}: {}", input.display(), err);
                tracing::warn!("{}", message);
                ConversionOutcome {
                    success: false,
                    message,
                    report: None,
                }
            }
        }
    }
}

/// Convert a single image file into a 3D asset at `output`
///
/// Never fails: every stage error is logged and returned as an unsuccessful outcome.
pub fn convert_image(input: &Path, output: &Path, config: &ConvertConfig) -> ConversionOutcome {
    Converter::new(config).convert_reported(input, output)
}

/// Output path for `input` inside `output_dir`: same stem, asset extension
pub fn output_path_for(input: &Path, output_dir: &Path, format: AssetFormat) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(format.extension());
    output_dir.join(name)
}

/// Convert every jpg/jpeg/png directly inside `input_dir` into `output_dir`
///
/// The output folder is created if missing. One image failing never stops the
/// others; only an unreadable input folder or uncreatable output folder is an error.
pub fn batch_convert(
    input_dir: &Path,
    output_dir: &Path,
    config: &ConvertConfig,
    format: AssetFormat,
) -> std::io::Result<BatchSummary> {
    std::fs::create_dir_all(output_dir)?;

    let images = list_images(input_dir)?;
    if images.is_empty() {
        tracing::info!("No image files found in {}", input_dir.display());
        return Ok(BatchSummary::default());
    }

    tracing::info!("Found {} images to process", images.len());

    let converter = Converter::new(config);
    let convert_one = |input: &PathBuf| {
        let output = output_path_for(input, output_dir, format);
        (input.clone(), converter.convert_reported(input, &output))
    };

    let outcomes: Vec<(PathBuf, ConversionOutcome)> = if config.parallel {
        images.par_iter().map(convert_one).collect()
    } else {
        images.iter().map(convert_one).collect()
    };

    let succeeded = outcomes.iter().filter(|(_, o)| o.success).count();
    let summary = BatchSummary {
        succeeded,
        total: outcomes.len(),
        outcomes,
    };

    tracing::info!(
        "Successfully processed {} out of {} images",
        summary.succeeded,
        summary.total
    );

    Ok(summary)
}
