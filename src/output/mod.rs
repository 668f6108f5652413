mod buffer;
mod document;
mod glb;
mod texture;

pub use buffer::{
    pack_geometry, PackedGeometry, COLOR_ACCESSOR, INDEX_ACCESSOR, POSITION_ACCESSOR,
};
pub use document::{build_document, BufferSource, MATERIAL_NAME, MESH_NAME};
pub use glb::assemble_glb;
pub use texture::{data_uri, encode_png};

use crate::error::{ConvertError, Result};
use crate::mesh::ExtrudedMesh;
use gltf_json as json;
use image::RgbaImage;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Container the asset is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFormat {
    /// JSON with every buffer and image inlined as data URIs
    Gltf,
    /// Binary container, geometry in the BIN chunk
    Glb,
}

impl AssetFormat {
    /// `.glb` selects the binary container, anything else is plain glTF
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("glb") => AssetFormat::Glb,
            _ => AssetFormat::Gltf,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            AssetFormat::Gltf => "gltf",
            AssetFormat::Glb => "glb",
        }
    }
}

/// A finished asset: document plus the geometry payload it describes
#[derive(Debug, Clone)]
pub struct PackedAsset {
    pub format: AssetFormat,
    pub root: json::Root,
    pub geometry: Vec<u8>,
}

impl PackedAsset {
    /// Serialize into the bytes of the output file
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self.format {
            AssetFormat::Gltf => Ok(serde_json::to_vec_pretty(&self.root)?),
            AssetFormat::Glb => assemble_glb(&self.root, &self.geometry),
        }
    }
}

/// Pack mesh buffers and the masked texture into a self-contained asset
pub fn pack_asset(
    mesh: &ExtrudedMesh,
    texture: &RgbaImage,
    format: AssetFormat,
) -> Result<PackedAsset> {
    let _span = tracing::debug_span!("pack_asset").entered();

    let geometry = pack_geometry(mesh);
    let vertex_bytes = geometry.vertex_region_len();
    tracing::debug!(
        "Geometry buffer: {} vertex bytes, {} index bytes",
        vertex_bytes,
        geometry.data.len() - vertex_bytes
    );
    let png = encode_png(texture)?;
    tracing::debug!("Texture PNG: {} bytes", png.len());

    let buffer = match format {
        AssetFormat::Gltf => {
            BufferSource::DataUri(data_uri("application/octet-stream", &geometry.data))
        }
        AssetFormat::Glb => BufferSource::BinaryChunk,
    };
    let root = build_document(&geometry, buffer, data_uri("image/png", &png))?;

    Ok(PackedAsset {
        format,
        root,
        geometry: geometry.data,
    })
}

/// Trait for asset destinations
pub trait AssetSink {
    /// Persist one packed asset
    fn write_asset(&mut self, asset: &PackedAsset) -> Result<()>;
}

/// Writes the asset to a single file
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Sibling path the asset is staged at before being renamed into place
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("asset"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl AssetSink for FileSink {
    fn write_asset(&mut self, asset: &PackedAsset) -> Result<()> {
        let bytes = asset.to_bytes()?;

        // Staged write, so a failure never leaves a truncated asset behind
        let staging = self.staging_path();
        let written = std::fs::write(&staging, &bytes).and_then(|()| {
            #[cfg(windows)]
            {
                if self.path.is_file() {
                    std::fs::remove_file(&self.path)?;
                }
            }
            std::fs::rename(&staging, &self.path)
        });

        if let Err(source) = written {
            let _ = std::fs::remove_file(&staging);
            return Err(ConvertError::AssetWriteFailure {
                path: self.path.clone(),
                source,
            });
        }

        tracing::debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}
