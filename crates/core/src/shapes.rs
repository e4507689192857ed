//! Shape catalog - the seven piece kinds as fixed cell masks
//!
//! Masks are stored row-major with the top-left cell at (0, 0). A mask is at
//! most 4x4; unused rows/columns beyond `rows`/`cols` are always `false`.

use crate::rng::RandomSource;
use crate::types::{Color, PieceKind};

/// Largest mask edge supported by [`Mask`].
pub const MAX_MASK: usize = 4;

/// A small 2-D boolean cell mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask {
    bits: [[bool; MAX_MASK]; MAX_MASK],
    rows: u8,
    cols: u8,
}

impl Mask {
    /// Build a mask from 0/1 rows. Any non-zero value marks a set cell.
    pub const fn from_rows<const R: usize, const C: usize>(src: [[u8; C]; R]) -> Self {
        assert!(R > 0 && C > 0 && R <= MAX_MASK && C <= MAX_MASK);
        let mut bits = [[false; MAX_MASK]; MAX_MASK];
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                bits[r][c] = src[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            bits,
            rows: R as u8,
            cols: C as u8,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Cell at (row, col); `false` outside the mask.
    pub fn get(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.bits[row as usize][col as usize]
    }

    /// Offsets `(col, row)` of every set cell, row by row.
    pub fn set_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.bits[r as usize][c as usize])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Rotate by a quarter turn: transpose, then reverse the row order.
    ///
    /// A `rows x cols` mask becomes `cols x rows`.
    pub fn rotated(&self) -> Self {
        let rows = self.cols;
        let cols = self.rows;
        let mut bits = [[false; MAX_MASK]; MAX_MASK];
        for r in 0..rows as usize {
            for c in 0..cols as usize {
                // transpose[i][j] = old[j][i]; row i of the result is transpose row (rows-1-i)
                bits[r][c] = self.bits[c][rows as usize - 1 - r];
            }
        }
        Self { bits, rows, cols }
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub kind: PieceKind,
    pub mask: Mask,
    pub color: Color,
}

/// The fixed catalog, indexed by [`PieceKind::index`].
pub static CATALOG: [Shape; 7] = [
    Shape {
        kind: PieceKind::I,
        mask: Mask::from_rows([[1, 1, 1, 1]]),
        color: Color::Cyan,
    },
    Shape {
        kind: PieceKind::O,
        mask: Mask::from_rows([[1, 1], [1, 1]]),
        color: Color::Yellow,
    },
    Shape {
        kind: PieceKind::T,
        mask: Mask::from_rows([[0, 1, 0], [1, 1, 1]]),
        color: Color::Purple,
    },
    Shape {
        kind: PieceKind::S,
        mask: Mask::from_rows([[0, 1, 1], [1, 1, 0]]),
        color: Color::Green,
    },
    Shape {
        kind: PieceKind::Z,
        mask: Mask::from_rows([[1, 1, 0], [0, 1, 1]]),
        color: Color::Red,
    },
    Shape {
        kind: PieceKind::J,
        mask: Mask::from_rows([[1, 0, 0], [1, 1, 1]]),
        color: Color::Blue,
    },
    Shape {
        kind: PieceKind::L,
        mask: Mask::from_rows([[0, 0, 1], [1, 1, 1]]),
        color: Color::Orange,
    },
];

/// Look up the catalog entry for a kind.
pub fn shape(kind: PieceKind) -> &'static Shape {
    &CATALOG[kind.index()]
}

/// Draw one shape uniformly at random from the catalog.
pub fn random_shape(rng: &mut impl RandomSource) -> &'static Shape {
    &CATALOG[rng.next_index(CATALOG.len()) % CATALOG.len()]
}
