//! Cube with one solid color per face.
//!
//! Each face has its own 4 vertices so colors do not bleed across edges:
//! 6 faces × 4 vertices = 24 vertices, 6 faces × 2 triangles = 36 indices.

use prism_engine::paint::Color;

pub const FACE_COUNT: usize = 6;
pub const VERTEX_COUNT: usize = FACE_COUNT * 4;
pub const INDEX_COUNT: usize = FACE_COUNT * 6;

#[rustfmt::skip]
pub const POSITIONS: [[f32; 3]; VERTEX_COUNT] = [
    // front
    [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
    // back
    [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0],
    // top
    [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0],
    // bottom
    [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],
    // right
    [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0],
    // left
    [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],
];

/// Face colors, in the face order of [`POSITIONS`].
pub const FACE_COLORS: [Color; FACE_COUNT] = [
    Color::WHITE,
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::MAGENTA,
];

/// One color per vertex: each face color repeated for its 4 vertices.
pub const COLORS: [[f32; 4]; VERTEX_COUNT] = expand_face_colors(&FACE_COLORS);

#[rustfmt::skip]
pub const INDICES: [u16; INDEX_COUNT] = [
     0,  1,  2,   0,  2,  3, // front
     4,  5,  6,   4,  6,  7, // back
     8,  9, 10,   8, 10, 11, // top
    12, 13, 14,  12, 14, 15, // bottom
    16, 17, 18,  16, 18, 19, // right
    20, 21, 22,  20, 22, 23, // left
];

const fn expand_face_colors(faces: &[Color; FACE_COUNT]) -> [[f32; 4]; VERTEX_COUNT] {
    let mut out = [[0.0; 4]; VERTEX_COUNT];
    let mut i = 0;
    while i < VERTEX_COUNT {
        out[i] = faces[i / 4].to_array();
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn indices_reference_existing_vertices() {
        assert_eq!(INDICES.len(), 36);
        assert!(INDICES.iter().all(|&i| (i as usize) < VERTEX_COUNT));
    }

    #[test]
    fn each_face_is_two_triangles_over_its_own_four_vertices() {
        for (face, chunk) in INDICES.chunks_exact(6).enumerate() {
            let distinct: BTreeSet<u16> = chunk.iter().copied().collect();
            assert_eq!(distinct.len(), 4, "face {face}");

            let first = (face * 4) as u16;
            assert!(distinct.iter().all(|&i| (first..first + 4).contains(&i)), "face {face}");

            // Neither triangle is degenerate.
            for tri in chunk.chunks_exact(3) {
                let t: BTreeSet<u16> = tri.iter().copied().collect();
                assert_eq!(t.len(), 3, "face {face}");
            }
        }
    }

    #[test]
    fn colors_come_in_runs_of_four() {
        assert_eq!(COLORS.len(), 4 * FACE_COUNT);
        assert_eq!(COLORS.len(), POSITIONS.len());
        for (face, run) in COLORS.chunks_exact(4).enumerate() {
            assert!(run.iter().all(|c| *c == run[0]), "face {face}");
            assert_eq!(run[0], FACE_COLORS[face].to_array());
        }
    }

    #[test]
    fn every_face_is_planar_on_the_unit_cube() {
        for (face, quad) in POSITIONS.chunks_exact(4).enumerate() {
            let fixed_axis = (0..3).find(|&axis| {
                quad.iter().all(|v| v[axis] == quad[0][axis]) && quad[0][axis].abs() == 1.0
            });
            assert!(fixed_axis.is_some(), "face {face} is not axis-aligned");
        }
        assert!(POSITIONS.iter().flatten().all(|c| c.abs() == 1.0));
    }
}
