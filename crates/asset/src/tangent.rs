//! Per-vertex tangent space (tangent + bitangent) for normal/parallax mapping.
//!
//! Face tangents are solved per triangle from the position and UV edge
//! deltas, averaged over the triangles incident to each vertex, then
//! Gram-Schmidt orthogonalized against the vertex normal.
//!
//! Sign convention: the tangent follows increasing `u`, the bitangent
//! increasing `v`. For a face whose UVs are not mirrored,
//! `cross(tangent, bitangent)` points along the normal.

use corelib::math::{normalize_relative, orthogonal_axis};
use corelib::{GeometryError, GeometryResult, Vec2, Vec3};
use serde::Serialize;

use crate::mesh::MeshData;

/// UV-space determinants smaller than this are treated as degenerate.
pub const DEGENERATE_UV_DET: f32 = 1e-12;

/// What the builder had to patch up while finalizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TangentReport {
    /// Triangles skipped because their UV mapping has no area.
    pub degenerate_triangles: usize,
    /// Vertices not referenced by any (non-degenerate) triangle.
    pub unreferenced_vertices: usize,
    pub tangent_fallbacks: usize,
    pub bitangent_fallbacks: usize,
}

impl TangentReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Finalized tangent frames, index-aligned with the mesh vertices.
/// Every entry is unit length and orthogonal to the vertex normal.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TangentFrames {
    pub tangents: Vec<[f32; 3]>,
    pub bitangents: Vec<[f32; 3]>,
    pub report: TangentReport,
    #[serde(skip)]
    normals: Vec<Vec3>,
}

impl TangentFrames {
    pub fn len(&self) -> usize {
        self.tangents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tangents.is_empty()
    }

    pub fn tangents_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.tangents)
    }

    pub fn bitangents_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.bitangents)
    }

    /// +1 for right-handed frames, -1 where the UVs are mirrored.
    /// Lets consumers pack `(tangent, w)` and rebuild the bitangent.
    pub fn handedness(&self) -> Vec<f32> {
        self.tangents
            .iter()
            .zip(&self.bitangents)
            .zip(&self.normals)
            .map(|((t, b), n)| {
                if n.cross(Vec3::from_array(*t)).dot(Vec3::from_array(*b)) < 0.0 {
                    -1.0
                } else {
                    1.0
                }
            })
            .collect()
    }
}

/// Running per-vertex sums, indexed by vertex id.
#[derive(Clone, Copy, Debug, Default)]
struct Accumulator {
    tangent: Vec3,
    bitangent: Vec3,
    triangles: u32,
}

/// Tangent-space builder over borrowed attribute slices.
///
/// Runs once: [`TangentBuilder::build`] consumes the builder, so the
/// accumulating sums are never observable.
pub struct TangentBuilder<'a> {
    positions: &'a [[f32; 3]],
    uvs: &'a [[f32; 2]],
    normals: &'a [[f32; 3]],
    acc: Vec<Accumulator>,
    report: TangentReport,
}

impl<'a> TangentBuilder<'a> {
    pub fn new(
        positions: &'a [[f32; 3]],
        uvs: &'a [[f32; 2]],
        normals: &'a [[f32; 3]],
    ) -> GeometryResult<Self> {
        let n = positions.len();
        for (what, actual) in [("uvs", uvs.len()), ("normals", normals.len())] {
            if actual != n {
                return Err(GeometryError::AttributeLengthMismatch {
                    what,
                    expected: n,
                    actual,
                });
            }
        }
        Ok(Self {
            positions,
            uvs,
            normals,
            acc: vec![Accumulator::default(); n],
            report: TangentReport::default(),
        })
    }

    /// Accumulate every triangle of `indices`, then finalize.
    pub fn build(mut self, indices: &[u32]) -> GeometryResult<TangentFrames> {
        if indices.len() % 3 != 0 {
            return Err(GeometryError::IndexCount(indices.len()));
        }
        let vertex_count = self.positions.len();
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        for tri in indices.chunks_exact(3) {
            self.accumulate([tri[0] as usize, tri[1] as usize, tri[2] as usize]);
        }
        Ok(self.finalize())
    }

    fn accumulate(&mut self, tri: [usize; 3]) {
        let [i0, i1, i2] = tri;
        let p0 = Vec3::from_array(self.positions[i0]);
        let uv0 = Vec2::from_array(self.uvs[i0]);

        let dp1 = Vec3::from_array(self.positions[i1]) - p0;
        let dp2 = Vec3::from_array(self.positions[i2]) - p0;
        let duv1 = Vec2::from_array(self.uvs[i1]) - uv0;
        let duv2 = Vec2::from_array(self.uvs[i2]) - uv0;

        let det = duv1.x * duv2.y - duv1.y * duv2.x;
        if !det.is_finite() || det.abs() < DEGENERATE_UV_DET {
            self.report.degenerate_triangles += 1;
            return;
        }

        let inv_det = 1.0 / det;
        let tangent = (dp1 * duv2.y - dp2 * duv1.y) * inv_det;
        let bitangent = (dp2 * duv1.x - dp1 * duv2.x) * inv_det;
        if !tangent.is_finite() || !bitangent.is_finite() {
            self.report.degenerate_triangles += 1;
            return;
        }

        for i in tri {
            let a = &mut self.acc[i];
            a.tangent += tangent;
            a.bitangent += bitangent;
            a.triangles += 1;
        }
    }

    fn finalize(self) -> TangentFrames {
        let Self {
            normals,
            acc,
            mut report,
            ..
        } = self;

        let mut tangents = Vec::with_capacity(acc.len());
        let mut bitangents = Vec::with_capacity(acc.len());
        let mut unit_normals = Vec::with_capacity(acc.len());

        for (a, n) in acc.iter().zip(normals) {
            let n = Vec3::from_array(*n).try_normalize().unwrap_or(Vec3::Z);

            let (t, b) = if a.triangles > 0 {
                let inv = 1.0 / a.triangles as f32;
                (a.tangent * inv, a.bitangent * inv)
            } else {
                report.unreferenced_vertices += 1;
                (Vec3::ZERO, Vec3::ZERO)
            };

            let t1 = match normalize_relative(t - n * t.dot(n), t.length()) {
                Some(t1) => t1,
                None => {
                    report.tangent_fallbacks += 1;
                    orthogonal_axis(n)
                }
            };
            let b1 = match normalize_relative(b - n * b.dot(n) - t1 * b.dot(t1), b.length()) {
                Some(b1) => b1,
                None => {
                    report.bitangent_fallbacks += 1;
                    n.cross(t1).normalize()
                }
            };

            tangents.push(t1.to_array());
            bitangents.push(b1.to_array());
            unit_normals.push(n);
        }

        if report.is_clean() {
            log::debug!("Tangent frames finalized for {} vertices", tangents.len());
        } else {
            log::warn!(
                "Tangent frames for {} vertices needed fallbacks: {} degenerate triangles, \
                 {} unreferenced vertices, {} tangent / {} bitangent substitutions",
                tangents.len(),
                report.degenerate_triangles,
                report.unreferenced_vertices,
                report.tangent_fallbacks,
                report.bitangent_fallbacks
            );
        }

        TangentFrames {
            tangents,
            bitangents,
            report,
            normals: unit_normals,
        }
    }
}

/// Compute tangent frames for a mesh's triangle list.
pub fn compute_tangents(mesh: &MeshData) -> GeometryResult<TangentFrames> {
    TangentBuilder::new(&mesh.positions, &mesh.uvs, &mesh.normals)?.build(&mesh.indices)
}
