//! CPU-side mesh representation produced by the generators.

use bytemuck::{Pod, Zeroable};
use corelib::{GeometryError, GeometryResult};
use serde::Serialize;

use crate::tangent::TangentFrames;

/// Interleaved vertex with a finalized tangent frame. Values are in object space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
            ..Self::default()
        }
    }
}

/// Raw bytes of an interleaved vertex slice, ready for upload.
pub fn vertex_bytes(vertices: &[MeshVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Indexed triangle mesh with one flat buffer per attribute.
///
/// `indices` is a triangle list, `edge_indices` a line list for wireframe
/// drawing. All attribute buffers have one entry per vertex.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<[f32; 3]>>,
    pub indices: Vec<u32>,
    pub edge_indices: Vec<u32>,
}

impl MeshData {
    pub fn with_capacity(vertices: usize, indices: usize, edges: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            colors: None,
            indices: Vec::with_capacity(indices),
            edge_indices: Vec::with_capacity(edges),
        }
    }

    pub(crate) fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) {
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_indices.len() / 2
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.positions.is_empty() && !self.indices.is_empty()
    }

    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normals_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn uvs_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.uvs)
    }

    pub fn colors_flat(&self) -> Option<&[f32]> {
        self.colors.as_deref().map(bytemuck::cast_slice)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Replace the UV set, e.g. with [`crate::atlas::CUBE_ATLAS_UVS`].
    pub fn with_uvs(mut self, uvs: &[[f32; 2]]) -> GeometryResult<Self> {
        if uvs.len() != self.vertex_count() {
            return Err(GeometryError::AttributeLengthMismatch {
                what: "uvs",
                expected: self.vertex_count(),
                actual: uvs.len(),
            });
        }
        self.uvs.clear();
        self.uvs.extend_from_slice(uvs);
        Ok(self)
    }

    /// Zip the attribute buffers and a finalized tangent frame set into
    /// interleaved vertices.
    pub fn interleave(&self, frames: &TangentFrames) -> GeometryResult<Vec<MeshVertex>> {
        let n = self.vertex_count();
        for (what, actual) in [
            ("normals", self.normals.len()),
            ("uvs", self.uvs.len()),
            ("tangents", frames.tangents.len()),
            ("bitangents", frames.bitangents.len()),
        ] {
            if actual != n {
                return Err(GeometryError::AttributeLengthMismatch {
                    what,
                    expected: n,
                    actual,
                });
            }
        }

        Ok((0..n)
            .map(|i| MeshVertex {
                position: self.positions[i],
                normal: self.normals[i],
                uv: self.uvs[i],
                tangent: frames.tangents[i],
                bitangent: frames.bitangents[i],
            })
            .collect())
    }
}
