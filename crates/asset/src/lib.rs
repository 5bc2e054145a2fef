//! Procedural mesh assets (CPU side).
//! Sphere and cube generators, the cube UV atlas and per-vertex tangent frames.

pub mod atlas;
pub mod cube;
pub mod mesh;
pub mod sphere;
pub mod tangent;

pub use cube::{CubeParams, generate_cube, generate_cube_atlas};
pub use mesh::{MeshData, MeshVertex, vertex_bytes};
pub use sphere::{SphereParams, generate_sphere};
pub use tangent::{TangentBuilder, TangentFrames, TangentReport, compute_tangents};
