use crate::error::Result;
use gltf_json as json;

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F534A;
const CHUNK_BIN: u32 = 0x004E4942;

/// Assemble a GLB container from the document and its binary buffer
pub fn assemble_glb(root: &json::Root, buffer_data: &[u8]) -> Result<Vec<u8>> {
    let json_bytes = serde_json::to_vec(root)?;

    // Both chunks are 4-byte aligned: JSON with spaces, binary with zeros
    let json_padding = padding(json_bytes.len());
    let json_chunk_length = json_bytes.len() + json_padding;

    let buffer_padding = padding(buffer_data.len());
    let buffer_chunk_length = buffer_data.len() + buffer_padding;

    let total_length = 12 + 8 + json_chunk_length + 8 + buffer_chunk_length;
    let mut glb = Vec::with_capacity(total_length);

    glb.extend_from_slice(GLB_MAGIC);
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&(total_length as u32).to_le_bytes());

    glb.extend_from_slice(&(json_chunk_length as u32).to_le_bytes());
    glb.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    glb.extend_from_slice(&json_bytes);
    glb.resize(glb.len() + json_padding, b' ');

    glb.extend_from_slice(&(buffer_chunk_length as u32).to_le_bytes());
    glb.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    glb.extend_from_slice(buffer_data);
    glb.resize(glb.len() + buffer_padding, 0);

    Ok(glb)
}

fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn test_padding() {
        assert_eq!(padding(0), 0);
        assert_eq!(padding(5), 3);
        assert_eq!(padding(296), 0);
        assert_eq!(padding(298), 2);
    }

    #[test]
    fn test_glb_header_and_chunks() {
        let root = json::Root::default();
        let glb = assemble_glb(&root, &[1, 2, 3, 4, 5, 6]).unwrap();

        assert_eq!(&glb[0..4], b"glTF");
        assert_eq!(read_u32(&glb, 4), 2);
        assert_eq!(read_u32(&glb, 8) as usize, glb.len());
        assert_eq!(glb.len() % 4, 0);

        let json_len = read_u32(&glb, 12) as usize;
        assert_eq!(read_u32(&glb, 16), CHUNK_JSON);
        assert_eq!(json_len % 4, 0);

        let bin_header = 20 + json_len;
        assert_eq!(read_u32(&glb, bin_header), 8);
        assert_eq!(read_u32(&glb, bin_header + 4), CHUNK_BIN);
        assert_eq!(&glb[bin_header + 8..], &[1, 2, 3, 4, 5, 6, 0, 0]);
    }
}
