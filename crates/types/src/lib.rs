//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, score persistence).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::ALL[PieceKind::T.index()], PieceKind::T);
//! assert_eq!(Color::from_code(Color::Orange.code()), Some(Color::Orange));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the top-left mask cell for every new piece.
pub const SPAWN_X: i8 = 3;

/// Row of the top-left mask cell for every new piece.
pub const SPAWN_Y: i8 = 0;

/// Default gravity period in milliseconds (one row per tick).
pub const TICK_MS: u32 = 500;

/// Points awarded per cleared row. Multi-row clears add up linearly.
pub const POINTS_PER_ROW: u32 = 10;

/// The seven piece kinds of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// Display color tag of a piece and of the board cells it locks into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl Color {
    /// Compact non-zero code used by snapshots (0 means empty).
    pub fn code(&self) -> u8 {
        match self {
            Color::Cyan => 1,
            Color::Yellow => 2,
            Color::Purple => 3,
            Color::Green => 4,
            Color::Red => 5,
            Color::Blue => 6,
            Color::Orange => 7,
        }
    }

    /// Inverse of [`Color::code`]. Returns `None` for 0 and unknown codes.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Color::Cyan),
            2 => Some(Color::Yellow),
            3 => Some(Color::Purple),
            4 => Some(Color::Green),
            5 => Some(Color::Red),
            6 => Some(Color::Blue),
            7 => Some(Color::Orange),
            _ => None,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell holding a locked piece of that color
pub type Cell = Option<Color>;

/// Horizontal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta for one step in this direction.
    pub fn dx(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Commands a driver can issue to a session.
///
/// These are produced by the keyboard mapping and consumed by
/// `Session::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (same transition as a gravity tick)
    SoftDrop,
    /// Rotate piece 90°
    Rotate,
    /// Start a fresh session in place
    Restart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_and_timing_constants() {
        assert_eq!(BOARD_WIDTH, 10);
        assert_eq!(BOARD_HEIGHT, 20);
        assert_eq!((SPAWN_X, SPAWN_Y), (3, 0));
        assert_eq!(TICK_MS, 500);
        assert_eq!(POINTS_PER_ROW, 10);
    }

    #[test]
    fn color_codes_round_trip_and_skip_zero() {
        for code in 1..=7u8 {
            let color = Color::from_code(code).unwrap();
            assert_eq!(color.code(), code);
        }
        assert_eq!(Color::from_code(0), None);
        assert_eq!(Color::from_code(8), None);
    }

    #[test]
    fn kind_index_matches_catalog_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn direction_deltas() {
        assert_eq!(Direction::Left.dx(), -1);
        assert_eq!(Direction::Right.dx(), 1);
    }
}
