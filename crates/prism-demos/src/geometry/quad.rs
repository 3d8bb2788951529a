//! Full square in the XY plane, in triangle-strip order.

pub const VERTEX_COUNT: usize = 4;

#[rustfmt::skip]
pub const POSITIONS: [[f32; 2]; VERTEX_COUNT] = [
    [ 1.0,  1.0],
    [-1.0,  1.0],
    [ 1.0, -1.0],
    [-1.0, -1.0],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_covers_the_square_with_two_triangles() {
        // Strip triangles are (0,1,2) and (1,2,3); together they must touch all four corners.
        let corners: std::collections::BTreeSet<(i32, i32)> = POSITIONS
            .iter()
            .map(|p| (p[0] as i32, p[1] as i32))
            .collect();
        assert_eq!(corners.len(), 4);

        // The shared edge (1,2) is the diagonal: opposite corners.
        assert_eq!(POSITIONS[1][0], -POSITIONS[2][0]);
        assert_eq!(POSITIONS[1][1], -POSITIONS[2][1]);
    }
}
