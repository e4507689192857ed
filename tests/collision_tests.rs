//! Collision rule and rotation tests

use blockfall::core::{rotate, shape, would_collide, Board, Mask, CATALOG};
use blockfall::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn in_bounds_over_empty_cells_never_collides() {
    let board = Board::new();
    for s in CATALOG.iter() {
        let max_x = BOARD_WIDTH as i8 - s.mask.cols() as i8;
        let max_y = BOARD_HEIGHT as i8 - s.mask.rows() as i8;
        for y in 0..=max_y {
            for x in 0..=max_x {
                assert!(!would_collide(&s.mask, x, y, &board), "{:?} at ({}, {})", s.kind, x, y);
            }
        }
    }
}

#[test]
fn each_wall_and_the_floor_collide() {
    let board = Board::new();
    let o = shape(PieceKind::O).mask;

    assert!(would_collide(&o, -1, 5, &board));
    assert!(would_collide(&o, BOARD_WIDTH as i8 - 1, 5, &board));
    assert!(would_collide(&o, 4, BOARD_HEIGHT as i8 - 1, &board));
}

#[test]
fn row_above_top_alone_never_collides() {
    let board = Board::new();
    for s in CATALOG.iter() {
        assert!(!would_collide(&s.mask, 3, -(s.mask.rows() as i8), &board), "{:?}", s.kind);
        assert!(!would_collide(&s.mask, 3, -1, &board), "{:?}", s.kind);
    }
}

#[test]
fn above_top_still_checks_walls() {
    let board = Board::new();
    let i = shape(PieceKind::I).mask;
    assert!(would_collide(&i, -1, -3, &board));
    assert!(would_collide(&i, 7, -3, &board));
}

#[test]
fn occupied_cell_collides_only_under_a_set_cell() {
    let mut board = Board::new();
    board.set(10, 3, Some(Color::Red));

    // T mask [[0,1,0],[1,1,1]]: (row 0, col 0) is empty
    let t = shape(PieceKind::T).mask;
    assert!(!would_collide(&t, 3, 10, &board));
    assert!(would_collide(&t, 3, 9, &board));
    assert!(would_collide(&t, 2, 10, &board));
}

#[test]
fn four_rotations_restore_every_shape() {
    for s in CATALOG.iter() {
        let mut m = s.mask;
        for _ in 0..4 {
            m = rotate(&m);
        }
        assert_eq!(m, s.mask, "{:?}", s.kind);
    }
}

#[test]
fn one_rotation_changes_every_asymmetric_shape() {
    for kind in [PieceKind::I, PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
        let m = shape(kind).mask;
        assert_ne!(rotate(&m), m, "{:?}", kind);
    }
    let o = shape(PieceKind::O).mask;
    assert_eq!(rotate(&o), o);
}

#[test]
fn i_piece_rotates_to_vertical() {
    let i = shape(PieceKind::I).mask;
    assert_eq!(rotate(&i), Mask::from_rows([[1], [1], [1], [1]]));
}

#[test]
fn s_piece_rotation_matches_transpose_then_reverse() {
    // S = [[0,1,1],[1,1,0]]; transpose = [[0,1],[1,1],[1,0]]; reversed rows:
    let s = shape(PieceKind::S).mask;
    assert_eq!(rotate(&s), Mask::from_rows([[1, 0], [1, 1], [0, 1]]));
}
