//! Shape table - the orientation catalogue.
//!
//! There are 7 basic four-cell pieces. Each table entry is one orientation:
//! an implicit center cell plus three offsets expressed in the board's
//! linear index space (so `-cols` is straight up, `+1` is right), and the
//! index of the entry that represents this orientation turned 90 degrees.
//! The first 7 entries are the canonical pieces; the remaining 12 are their
//! rotated forms, and following the rotation links from any canonical entry
//! returns to it after 1, 2, or 4 steps.
//!
//! Two orientations deliberately escape the 3x3 box around the center: the
//! horizontal bar reaches `+2` (two columns right) and its vertical form
//! reaches `+2*cols` (two rows down). The board's top buffer row and double
//! floor exist so these can be tested without bounds checks.

/// Number of canonical (spawnable) shapes.
pub const CANONICAL_SHAPES: usize = 7;

/// Total catalogue entries: canonical shapes plus rotated variants.
pub const TABLE_LEN: usize = 19;

/// One piece orientation: rotation-successor index plus three offsets from
/// the center cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rot: usize,
    off: [i32; 3],
}

impl Shape {
    /// Index of this orientation rotated 90 degrees.
    pub fn rotation_successor(&self) -> usize {
        self.rot
    }

    /// Offsets of the three non-center cells, in linear board index space.
    pub fn offsets(&self) -> &[i32; 3] {
        &self.off
    }
}

/// The full 19-entry catalogue for a given board width. Built once at
/// engine construction and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTable {
    shapes: [Shape; TABLE_LEN],
}

impl ShapeTable {
    pub fn new(cols: usize) -> Self {
        let c = cols as i32;
        let tl = -c - 1; // top left
        let tc = -c; // top center
        let tr = -c + 1; // top right
        let ml = -1; // middle left
        let mr = 1; // middle right
        let bl = c - 1; // bottom left
        let bc = c; // bottom center
        let br = c + 1; // bottom right

        let entry = |rot: usize, off: [i32; 3]| Shape { rot, off };
        Self {
            shapes: [
                entry(7, [tl, tc, mr]),
                entry(8, [tc, tr, ml]),
                entry(9, [ml, mr, bc]),
                entry(3, [tl, tc, ml]),
                entry(12, [ml, bl, mr]),
                entry(15, [ml, br, mr]),
                entry(18, [ml, mr, 2]), // sticks out right
                entry(0, [tc, ml, bl]),
                entry(1, [tc, mr, br]),
                entry(10, [tc, mr, bc]),
                entry(11, [tc, ml, mr]),
                entry(2, [tc, ml, bc]),
                entry(13, [tc, bc, br]),
                entry(14, [tr, ml, mr]),
                entry(4, [tl, tc, bc]),
                entry(16, [tr, tc, bc]),
                entry(17, [tl, mr, ml]),
                entry(5, [tc, bc, bl]),
                entry(6, [tc, bc, 2 * c]), // sticks out below
            ],
        }
    }

    pub fn shape(&self, index: usize) -> &Shape {
        &self.shapes[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }
}
