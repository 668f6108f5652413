use crate::error::{ConvertError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Encode the masked RGBA texture as PNG (lossless, keeps alpha)
pub fn encode_png(texture: &RgbaImage) -> Result<Vec<u8>> {
    let _span = tracing::debug_span!("encode_png").entered();

    let mut bytes = Vec::new();
    texture
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(ConvertError::TextureEncoding)?;
    Ok(bytes)
}

/// Self-contained `data:` URI for inline resources
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}
