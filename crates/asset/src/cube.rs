//! Cube generator: 6 independent faces, 4 vertices each.

use corelib::{GeometryError, GeometryResult};

use crate::atlas::CUBE_ATLAS_UVS;
use crate::mesh::MeshData;

pub const CUBE_VERTEX_COUNT: usize = 24;

/// Unit corner signs per vertex, face order: right, left, top, bottom, front, back.
const CORNERS: [[f32; 3]; CUBE_VERTEX_COUNT] = [
    // right (+x)
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    // left (-x)
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    // top (+y)
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    // bottom (-y)
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    // front (+z)
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    // back (-z)
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
];

const FACE_NORMALS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

/// Static per-vertex RGB colors (auxiliary attribute).
pub const CUBE_COLORS: [[f32; 3]; CUBE_VERTEX_COUNT] = [
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0],
];

/// Two outward (CCW) triangles per face, relative to the face's first vertex.
const FACE_TRIANGLES: [u32; 6] = [0, 2, 1, 2, 3, 1];

/// Cube edges: top ring, bottom ring, 4 verticals.
pub const CUBE_EDGE_INDICES: [u32; 24] = [
    8, 9, 9, 11, 11, 10, 10, 8, // top
    14, 15, 15, 13, 13, 12, 12, 14, // bottom
    11, 13, 9, 15, 8, 14, 10, 12, // sides
];

/// Cube parameters: edge length and UV tiling along u/v.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeParams {
    pub side: f32,
    pub u_scale: f32,
    pub v_scale: f32,
}

impl Default for CubeParams {
    fn default() -> Self {
        Self {
            side: 2.0,
            u_scale: 1.0,
            v_scale: 1.0,
        }
    }
}

impl CubeParams {
    pub fn generate(&self) -> GeometryResult<MeshData> {
        generate_cube(self.side, self.u_scale, self.v_scale)
    }
}

fn check_positive(name: &'static str, value: f32) -> GeometryResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid(
            name,
            format!("must be finite and > 0, got {value}"),
        ))
    }
}

/// Generate an axis-aligned cube centered at the origin.
///
/// Every face carries its own 4 vertices with a flat normal and UVs spanning
/// `[0, u_scale] x [0, v_scale]`, so edges stay hard.
///
/// # Returns
/// Mesh with 24 vertices, 36 triangle indices and 24 edge indices.
pub fn generate_cube(side: f32, u_scale: f32, v_scale: f32) -> GeometryResult<MeshData> {
    check_positive("side", side)?;
    check_positive("u_scale", u_scale)?;
    check_positive("v_scale", v_scale)?;

    let h = side / 2.0;
    let face_uvs = [[0.0, v_scale], [u_scale, v_scale], [0.0, 0.0], [u_scale, 0.0]];

    let mut mesh = MeshData::with_capacity(CUBE_VERTEX_COUNT, 36, CUBE_EDGE_INDICES.len());
    for (face, normal) in FACE_NORMALS.iter().enumerate() {
        let base = face * 4;
        for (corner, uv) in CORNERS[base..base + 4].iter().zip(face_uvs) {
            mesh.push_vertex(corner.map(|c| c * h), *normal, uv);
        }
        mesh.indices
            .extend(FACE_TRIANGLES.iter().map(|i| base as u32 + i));
    }
    mesh.colors = Some(CUBE_COLORS.to_vec());
    mesh.edge_indices.extend_from_slice(&CUBE_EDGE_INDICES);

    log::debug!(
        "Generated cube side={} uv_scale=({}, {})",
        side,
        u_scale,
        v_scale
    );

    Ok(mesh)
}

/// Cube textured through the 3x2 atlas instead of per-face tiling.
pub fn generate_cube_atlas(side: f32) -> GeometryResult<MeshData> {
    generate_cube(side, 1.0, 1.0)?.with_uvs(&CUBE_ATLAS_UVS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::Vec3;

    #[test]
    fn fixed_counts_for_any_parameters() {
        for (side, u, v) in [(2.0, 1.0, 1.0), (0.01, 4.0, 0.5), (250.0, 3.0, 3.0)] {
            let mesh = generate_cube(side, u, v).expect("valid cube");
            assert_eq!(mesh.vertex_count(), 24);
            assert_eq!(mesh.normals.len(), 24);
            assert_eq!(mesh.uvs.len(), 24);
            assert_eq!(mesh.colors.as_ref().map(Vec::len), Some(24));
            assert_eq!(mesh.indices.len(), 36);
            assert_eq!(mesh.edge_indices.len(), 24);
        }
    }

    #[test]
    fn faces_are_flat_and_outward() {
        let mesh = generate_cube(2.0, 1.0, 1.0).unwrap();
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(mesh.positions[i as usize]));
            let n = Vec3::from_array(mesh.normals[tri[0] as usize]);
            for &i in tri {
                assert_eq!(mesh.normals[i as usize], n.to_array());
                // every vertex of a face sits on the face plane
                let p = Vec3::from_array(mesh.positions[i as usize]);
                assert!((p.dot(n) - 1.0).abs() < 1e-6);
            }
            let face = (b - a).cross(c - a).normalize();
            assert!((face - n).length() < 1e-6, "tri {tri:?} winds against {n:?}");
        }
    }

    #[test]
    fn uvs_span_scale() {
        let mesh = generate_cube(1.0, 3.0, 2.0).unwrap();
        for face in mesh.uvs.chunks_exact(4) {
            assert_eq!(face, &[[0.0, 2.0], [3.0, 2.0], [0.0, 0.0], [3.0, 0.0]]);
        }
    }

    #[test]
    fn edges_are_twelve_distinct_cube_edges() {
        let mesh = generate_cube(2.0, 1.0, 1.0).unwrap();
        let mut seen = Vec::new();
        for pair in mesh.edge_indices.chunks_exact(2) {
            let a = Vec3::from_array(mesh.positions[pair[0] as usize]);
            let b = Vec3::from_array(mesh.positions[pair[1] as usize]);
            assert!(((a - b).length() - 2.0).abs() < 1e-6);
            let key = if a.to_array() < b.to_array() { (a, b) } else { (b, a) };
            assert!(!seen.contains(&key));
            seen.push(key);
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn rejects_non_positive_parameters() {
        assert!(matches!(
            generate_cube(0.0, 1.0, 1.0),
            Err(GeometryError::InvalidParameter { name: "side", .. })
        ));
        assert!(matches!(
            generate_cube(1.0, -1.0, 1.0),
            Err(GeometryError::InvalidParameter { name: "u_scale", .. })
        ));
        assert!(matches!(
            generate_cube(1.0, 1.0, f32::NAN),
            Err(GeometryError::InvalidParameter { name: "v_scale", .. })
        ));
    }

    #[test]
    fn deterministic_output() {
        let a = CubeParams::default().generate().unwrap();
        let b = generate_cube(2.0, 1.0, 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn atlas_cube_uses_atlas_uvs() {
        let mesh = generate_cube_atlas(2.5).unwrap();
        assert_eq!(mesh.uvs.as_slice(), &CUBE_ATLAS_UVS[..]);
        assert_eq!(mesh.positions[0], [1.25, 1.25, 1.25]);
    }
}
