//! Active piece and the collision rule.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::shapes::{Mask, Shape, MAX_MASK};
use crate::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

/// Absolute `(x, y)` positions of a piece's set cells.
pub type PieceCells = ArrayVec<(i8, i8), { MAX_MASK * MAX_MASK }>;

/// The currently falling piece.
///
/// `(x, y)` is the board position of the mask's top-left cell; `y` may be
/// negative while part of the mask sits above the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub color: Color,
    pub mask: Mask,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Place a catalog shape at the spawn origin.
    pub fn spawn(shape: &Shape) -> Self {
        Self {
            kind: shape.kind,
            color: shape.color,
            mask: shape.mask,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Absolute positions of every set cell.
    pub fn cells(&self) -> PieceCells {
        self.mask
            .set_cells()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Same piece moved by `(dx, dy)`. Not validated.
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece with its mask rotated in place. Not validated.
    pub fn rotated(&self) -> Self {
        Self {
            mask: rotate(&self.mask),
            ..*self
        }
    }

    /// Whether this placement is illegal on `board`.
    pub fn collides(&self, board: &Board) -> bool {
        would_collide(&self.mask, self.x, self.y, board)
    }
}

/// Collision rule for a mask placed with its top-left cell at `(x, y)`.
///
/// A set cell collides when it is below the floor, past either side wall,
/// or over a locked cell. Cells above the top edge never collide.
pub fn would_collide(mask: &Mask, x: i8, y: i8, board: &Board) -> bool {
    mask.set_cells().any(|(dx, dy)| {
        let col = x + dx;
        let row = y + dy;
        if row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return true;
        }
        row >= 0 && board.is_occupied(row, col)
    })
}

/// Quarter-turn rotation of a mask (transpose, then reverse rows).
pub fn rotate(mask: &Mask) -> Mask {
    mask.rotated()
}
