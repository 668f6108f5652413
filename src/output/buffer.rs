//! Geometry buffer layout: interleaved vertices followed by u16 indices

use crate::mesh::{ExtrudedMesh, Vertex};
use gltf_json as json;
use gltf_json::validation::Checked::Valid;

/// Accessor slots, in the order `pack_geometry` creates them
pub const POSITION_ACCESSOR: u32 = 0;
pub const COLOR_ACCESSOR: u32 = 1;
pub const INDEX_ACCESSOR: u32 = 2;

/// Binary payload plus the views and accessors describing it
#[derive(Debug, Clone)]
pub struct PackedGeometry {
    pub data: Vec<u8>,
    pub views: Vec<json::buffer::View>,
    pub accessors: Vec<json::Accessor>,
}

impl PackedGeometry {
    /// Byte length of the vertex region; the index region starts here
    pub fn vertex_region_len(&self) -> usize {
        self.views
            .first()
            .map_or(0, |view| view.byte_length.0 as usize)
    }
}

/// Lay out `[vertex bytes][index bytes]` in one buffer
///
/// No padding sits between the regions: the 28-byte vertex stride keeps the
/// index region 2-byte aligned. Offsets come from the actual region lengths.
pub fn pack_geometry(mesh: &ExtrudedMesh) -> PackedGeometry {
    let _span = tracing::debug_span!("pack_geometry").entered();

    let mut data: Vec<u8> = Vec::with_capacity(
        mesh.vertices.len() * Vertex::STRIDE + mesh.indices.len() * 2,
    );
    data.extend_from_slice(bytemuck::cast_slice(&mesh.vertices));
    let vertex_len = data.len();

    for index in &mesh.indices {
        data.extend_from_slice(&index.to_le_bytes());
    }
    let index_len = data.len() - vertex_len;

    let views = vec![
        json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: vertex_len.into(),
            byte_offset: Some(0u64.into()),
            byte_stride: Some(json::buffer::Stride(Vertex::STRIDE)),
            extensions: Default::default(),
            extras: Default::default(),
            name: Some("vertices".to_string()),
            target: Some(Valid(json::buffer::Target::ArrayBuffer)),
        },
        json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: index_len.into(),
            byte_offset: Some(vertex_len.into()),
            byte_stride: None,
            extensions: Default::default(),
            extras: Default::default(),
            name: Some("indices".to_string()),
            target: Some(Valid(json::buffer::Target::ElementArrayBuffer)),
        },
    ];

    let (min, max) = mesh.bounds();
    let accessors = vec![
        vertex_accessor(
            mesh.vertices.len(),
            0,
            json::accessor::Type::Vec3,
            Some((min, max)),
        ),
        vertex_accessor(
            mesh.vertices.len(),
            Vertex::COLOR_OFFSET,
            json::accessor::Type::Vec4,
            None,
        ),
        json::Accessor {
            buffer_view: Some(json::Index::new(1)),
            byte_offset: Some(0u64.into()),
            count: mesh.indices.len().into(),
            component_type: Valid(json::accessor::GenericComponentType(
                json::accessor::ComponentType::U16,
            )),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Valid(json::accessor::Type::Scalar),
            min: None,
            max: None,
            name: None,
            normalized: false,
            sparse: None,
        },
    ];

    tracing::debug!(
        "Geometry buffer: {} vertex bytes + {} index bytes",
        vertex_len,
        index_len
    );

    PackedGeometry {
        data,
        views,
        accessors,
    }
}

fn vertex_accessor(
    count: usize,
    offset: usize,
    type_: json::accessor::Type,
    bounds: Option<([f32; 3], [f32; 3])>,
) -> json::Accessor {
    let to_value = |axes: [f32; 3]| {
        json::Value::Array(axes.into_iter().map(json::Value::from).collect())
    };

    json::Accessor {
        buffer_view: Some(json::Index::new(0)),
        byte_offset: Some(offset.into()),
        count: count.into(),
        component_type: Valid(json::accessor::GenericComponentType(
            json::accessor::ComponentType::F32,
        )),
        extensions: Default::default(),
        extras: Default::default(),
        type_: Valid(type_),
        min: bounds.map(|(min, _)| to_value(min)),
        max: bounds.map(|(_, max)| to_value(max)),
        name: None,
        normalized: false,
        sparse: None,
    }
}
