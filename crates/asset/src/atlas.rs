//! Fixed 3x2 texture atlas layout for the cube, one cell per face.
//!
//! Cells (u to the right, v up):
//!
//! ```text
//! v=1   +-------+-------+-------+
//!       | front | right | back  |
//! v=1/2 +-------+-------+-------+
//!       | left  | top   | bottom|
//! v=0   +-------+-------+-------+
//!       0      1/3     2/3      1
//! ```

const T1: f32 = 1.0 / 3.0;
const T2: f32 = 2.0 / 3.0;

/// Atlas UVs in cube vertex order (right, left, top, bottom, front, back).
pub const CUBE_ATLAS_UVS: [[f32; 2]; 24] = [
    // right
    [T1, 1.0],
    [T2, 1.0],
    [T1, 0.5],
    [T2, 0.5],
    // left
    [0.0, 0.5],
    [T1, 0.5],
    [0.0, 0.0],
    [T1, 0.0],
    // top
    [T1, 0.5],
    [T2, 0.5],
    [T1, 0.0],
    [T2, 0.0],
    // bottom
    [T2, 0.5],
    [1.0, 0.5],
    [T2, 0.0],
    [1.0, 0.0],
    // front
    [0.0, 1.0],
    [T1, 1.0],
    [0.0, 0.5],
    [T1, 0.5],
    // back
    [T2, 1.0],
    [1.0, 1.0],
    [T2, 0.5],
    [1.0, 0.5],
];

pub fn cube_atlas_uvs() -> [[f32; 2]; 24] {
    CUBE_ATLAS_UVS
}
