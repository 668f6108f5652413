//! glTF document graph: one scene, node, mesh, primitive and material

use super::buffer::{PackedGeometry, COLOR_ACCESSOR, INDEX_ACCESSOR, POSITION_ACCESSOR};
use crate::error::Result;
use gltf_json as json;
use gltf_json::validation::Checked::Valid;
use serde_json::value::RawValue;
use std::collections::BTreeMap;

pub const MATERIAL_NAME: &str = "ExtrudedMaterial";
pub const MESH_NAME: &str = "ExtrudedMesh";

/// Where the geometry buffer lives
#[derive(Debug, Clone)]
pub enum BufferSource {
    /// Inline `data:` URI (.gltf)
    DataUri(String),
    /// Binary chunk of the GLB container
    BinaryChunk,
}

/// Build the document describing a packed geometry buffer and an inline texture
///
/// The texture is listed as an image and texture and tagged on the material's
/// extras; the mesh has no texture coordinates, so it is not bound as
/// `baseColorTexture`.
pub fn build_document(
    geometry: &PackedGeometry,
    buffer: BufferSource,
    texture_uri: String,
) -> Result<json::Root> {
    let mut attributes = BTreeMap::new();
    attributes.insert(
        Valid(json::mesh::Semantic::Positions),
        json::Index::new(POSITION_ACCESSOR),
    );
    attributes.insert(
        Valid(json::mesh::Semantic::Colors(0)),
        json::Index::new(COLOR_ACCESSOR),
    );

    let primitive = json::mesh::Primitive {
        attributes,
        extensions: Default::default(),
        extras: Default::default(),
        indices: Some(json::Index::new(INDEX_ACCESSOR)),
        material: Some(json::Index::new(0)),
        mode: Valid(json::mesh::Mode::Triangles),
        targets: None,
    };

    let mesh = json::Mesh {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some(MESH_NAME.to_string()),
        primitives: vec![primitive],
        weights: None,
    };

    let node = json::Node {
        mesh: Some(json::Index::new(0)),
        name: Some(MESH_NAME.to_string()),
        ..Default::default()
    };

    let scene = json::Scene {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some("Scene".to_string()),
        nodes: vec![json::Index::new(0)],
    };

    let material = json::Material {
        name: Some(MATERIAL_NAME.to_string()),
        pbr_metallic_roughness: json::material::PbrMetallicRoughness {
            base_color_factor: json::material::PbrBaseColorFactor([1.0, 1.0, 1.0, 1.0]),
            metallic_factor: json::material::StrengthFactor(0.0),
            roughness_factor: json::material::StrengthFactor(1.0),
            ..Default::default()
        },
        extras: Some(RawValue::from_string(r#"{"previewTexture":0}"#.to_string())?),
        ..Default::default()
    };

    let image = json::Image {
        buffer_view: None,
        mime_type: None,
        name: Some("texture".to_string()),
        uri: Some(texture_uri),
        extensions: Default::default(),
        extras: Default::default(),
    };

    let texture = json::Texture {
        name: Some("texture".to_string()),
        sampler: None,
        source: json::Index::new(0),
        extensions: Default::default(),
        extras: Default::default(),
    };

    let uri = match buffer {
        BufferSource::DataUri(uri) => Some(uri),
        BufferSource::BinaryChunk => None,
    };
    let buffers = vec![json::Buffer {
        byte_length: geometry.data.len().into(),
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        uri,
    }];

    Ok(json::Root {
        accessors: geometry.accessors.clone(),
        animations: Vec::new(),
        asset: json::Asset {
            copyright: None,
            extensions: Default::default(),
            extras: Default::default(),
            generator: Some(format!("img2gltf {}", env!("CARGO_PKG_VERSION"))),
            min_version: None,
            version: "2.0".to_string(),
        },
        buffers,
        buffer_views: geometry.views.clone(),
        cameras: Vec::new(),
        extensions: Default::default(),
        extensions_required: Vec::new(),
        extensions_used: Vec::new(),
        extras: Default::default(),
        images: vec![image],
        materials: vec![material],
        meshes: vec![mesh],
        nodes: vec![node],
        samplers: Vec::new(),
        scene: Some(json::Index::new(0)),
        scenes: vec![scene],
        skins: Vec::new(),
        textures: vec![texture],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvertConfig;
    use crate::mesh::MeshBuilder;
    use crate::output::buffer::pack_geometry;
    use crate::segmentation::BoundaryPolygon;

    fn square_geometry() -> PackedGeometry {
        let polygon = BoundaryPolygon::new(vec![[25, 25], [74, 25], [74, 74], [25, 74]]);
        let mesh = MeshBuilder::new(&ConvertConfig::default())
            .build(&polygon, 100, 100)
            .unwrap();
        pack_geometry(&mesh)
    }

    #[test]
    fn test_document_graph_shape() {
        let geometry = square_geometry();
        let root = build_document(
            &geometry,
            BufferSource::BinaryChunk,
            "data:image/png;base64,".to_string(),
        )
        .unwrap();

        assert_eq!(root.scenes.len(), 1);
        assert_eq!(root.nodes.len(), 1);
        assert_eq!(root.meshes.len(), 1);
        assert_eq!(root.meshes[0].primitives.len(), 1);
        assert_eq!(root.materials.len(), 1);
        assert_eq!(root.accessors.len(), 3);
        assert_eq!(root.buffer_views.len(), 2);
        assert_eq!(root.buffers[0].byte_length.0 as usize, geometry.data.len());
        assert!(root.buffers[0].uri.is_none());
    }

    #[test]
    fn test_document_json_fields() {
        let geometry = square_geometry();
        let root = build_document(
            &geometry,
            BufferSource::DataUri("data:application/octet-stream;base64,AA==".to_string()),
            "data:image/png;base64,AA==".to_string(),
        )
        .unwrap();
        let value = serde_json::to_value(&root).unwrap();

        assert_eq!(value["asset"]["version"], "2.0");
        assert_eq!(value["scene"], 0);

        let primitive = &value["meshes"][0]["primitives"][0];
        assert_eq!(primitive["attributes"]["POSITION"], 0);
        assert_eq!(primitive["attributes"]["COLOR_0"], 1);
        assert_eq!(primitive["indices"], 2);
        assert_eq!(primitive["material"], 0);

        let pbr = &value["materials"][0]["pbrMetallicRoughness"];
        assert_eq!(pbr["metallicFactor"], 0.0);
        assert_eq!(value["materials"][0]["extras"]["previewTexture"], 0);

        assert_eq!(value["bufferViews"][0]["byteStride"], 28);
        assert_eq!(value["bufferViews"][0]["target"], 34962);
        assert_eq!(value["bufferViews"][1]["target"], 34963);
        assert_eq!(value["bufferViews"][1]["byteOffset"], 224);
        assert_eq!(value["accessors"][1]["byteOffset"], 12);
        assert_eq!(value["accessors"][2]["componentType"], 5123);
        assert_eq!(value["accessors"][0]["type"], "VEC3");
        assert_eq!(value["accessors"][1]["type"], "VEC4");
        assert_eq!(value["accessors"][2]["type"], "SCALAR");
        assert_eq!(value["images"][0]["uri"], "data:image/png;base64,AA==");
        assert_eq!(value["textures"][0]["source"], 0);
    }
}
