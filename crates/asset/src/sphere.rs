//! UV sphere generator.

use std::f32::consts::PI;

use corelib::{GeometryError, GeometryResult};

use crate::mesh::MeshData;

/// Sphere parameters. `u` = latitude divisions, `v` = longitude divisions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereParams {
    pub radius: f32,
    pub u: u32,
    pub v: u32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 2.0,
            u: 20,
            v: 32,
        }
    }
}

impl SphereParams {
    pub fn generate(&self) -> GeometryResult<MeshData> {
        generate_sphere(self.radius, self.u, self.v)
    }
}

/// Position on a sphere of `radius` for polar angle `theta` and azimuth `phi` (radians).
#[inline]
fn sphere_position(radius: f32, theta: f32, phi: f32) -> [f32; 3] {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    [
        radius * sin_t * cos_p,
        radius * cos_t,
        -radius * sin_t * sin_p,
    ]
}

/// Generate a UV sphere.
///
/// Produces `(u + 1) * (v + 1)` vertices laid out row-major (stride `v + 1`),
/// `6 * u * v` triangle indices and `4 * u * v` wireframe edge indices.
/// Pole and seam vertices are duplicated so every grid cell has its own UVs.
///
/// Triangles are clockwise when seen from outside the sphere; pipelines
/// drawing it with back-face culling use a clockwise front face.
pub fn generate_sphere(radius: f32, u: u32, v: u32) -> GeometryResult<MeshData> {
    if u < 2 {
        return Err(GeometryError::invalid("u", format!("must be >= 2, got {u}")));
    }
    if v < 2 {
        return Err(GeometryError::invalid("v", format!("must be >= 2, got {v}")));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeometryError::invalid(
            "radius",
            format!("must be finite and > 0, got {radius}"),
        ));
    }

    let stride = v + 1;
    let vertex_count = (u64::from(u) + 1) * u64::from(stride);
    if vertex_count > u64::from(u32::MAX) {
        return Err(GeometryError::invalid(
            "u * v",
            format!("{vertex_count} vertices do not fit 32-bit indices"),
        ));
    }

    let quads = (u as usize) * (v as usize);
    let mut mesh = MeshData::with_capacity(vertex_count as usize, quads * 6, quads * 4);

    for i in 0..=u {
        let theta = i as f32 * PI / u as f32;
        for j in 0..=v {
            let phi = j as f32 * 2.0 * PI / v as f32;
            let p = sphere_position(radius, theta, phi);
            let n = [p[0] / radius, p[1] / radius, p[2] / radius];
            mesh.push_vertex(p, n, [i as f32 / u as f32, j as f32 / v as f32]);
        }
    }

    for i in 0..u {
        for j in 0..v {
            let idx0 = j + i * stride;
            let idx1 = idx0 + 1;
            let idx2 = idx1 + stride;
            let idx3 = idx0 + stride;

            mesh.indices
                .extend_from_slice(&[idx0, idx1, idx2, idx2, idx3, idx0]);
            mesh.edge_indices.extend_from_slice(&[idx0, idx1, idx0, idx3]);
        }
    }

    log::debug!(
        "Generated sphere r={} u={} v={}: {} vertices, {} triangles",
        radius,
        u,
        v,
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::Vec3;

    fn v3(a: [f32; 3]) -> Vec3 {
        Vec3::from_array(a)
    }

    #[test]
    fn positions_lie_on_sphere_and_normals_are_unit() {
        for (radius, u, v) in [(1.0, 2, 2), (2.0, 20, 32), (0.25, 7, 3), (10.0, 3, 9)] {
            let mesh = generate_sphere(radius, u, v).expect("valid sphere");
            for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
                let p = v3(*p);
                let n = v3(*n);
                assert!((p.length() - radius).abs() < 1e-4 * radius, "{p:?}");
                assert!((n.length() - 1.0).abs() < 1e-5, "{n:?}");
                assert!((p / radius - n).length() < 1e-6);
            }
        }
    }

    #[test]
    fn counts_follow_subdivisions() {
        for (u, v) in [(2, 2), (3, 5), (20, 32)] {
            let mesh = generate_sphere(1.0, u, v).unwrap();
            let (u, v) = (u as usize, v as usize);
            assert_eq!(mesh.vertex_count(), (u + 1) * (v + 1));
            assert_eq!(mesh.normals.len(), mesh.vertex_count());
            assert_eq!(mesh.uvs.len(), mesh.vertex_count());
            assert_eq!(mesh.indices.len(), 6 * u * v);
            assert_eq!(mesh.edge_indices.len(), 4 * u * v);
            assert!(mesh.colors.is_none());
            let n = mesh.vertex_count() as u32;
            assert!(mesh.indices.iter().all(|&i| i < n));
            assert!(mesh.edge_indices.iter().all(|&i| i < n));
        }
    }

    #[test]
    fn rejects_too_few_subdivisions() {
        assert!(matches!(
            generate_sphere(1.0, 1, 5),
            Err(GeometryError::InvalidParameter { name: "u", .. })
        ));
        assert!(matches!(
            generate_sphere(1.0, 5, 1),
            Err(GeometryError::InvalidParameter { name: "v", .. })
        ));
    }

    #[test]
    fn rejects_bad_radius() {
        for r in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                generate_sphere(r, 4, 4),
                Err(GeometryError::InvalidParameter { name: "radius", .. })
            ));
        }
    }

    #[test]
    fn minimal_sphere() {
        let mesh = generate_sphere(3.0, 2, 2).expect("2x2 sphere");
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.indices.len(), 24);
        assert_eq!(mesh.uvs[4], [0.5, 0.5]);
    }

    #[test]
    fn first_quad_layout() {
        let mesh = generate_sphere(1.0, 4, 6).unwrap();
        assert_eq!(&mesh.indices[..6], &[0, 1, 8, 8, 7, 0]);
        assert_eq!(&mesh.edge_indices[..4], &[0, 1, 0, 7]);
    }

    #[test]
    fn triangles_share_one_winding() {
        // Seen from outside every triangle is clockwise (front face = Cw).
        let mesh = generate_sphere(1.0, 8, 12).unwrap();
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| v3(mesh.positions[i as usize]));
            let face = (b - a).cross(c - a);
            if face.length() < 1e-6 {
                // pole triangles collapse to a line
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(face.dot(centroid) < 0.0, "mixed winding at {tri:?}");
        }
    }

    #[test]
    fn deterministic_output() {
        let a = generate_sphere(2.0, 20, 32).unwrap();
        let b = SphereParams::default().generate().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.positions_flat(), b.positions_flat());
    }
}
