use blockfall::core::{GameSnapshot, ScriptedShapes, Session};
use blockfall::term::{color_rgb, AnchorY, GameView, Viewport};
use blockfall::types::{Color, PieceKind};

fn empty_snapshot() -> GameSnapshot {
    GameSnapshot::default()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = empty_snapshot();
    let view = GameView::default();

    // cell_w=2, cell_h=1: board is 20x20 columns/rows, plus border => 22x22
    let vp = Viewport::new(22, 22);
    let fb = view.render(&snap, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = empty_snapshot();
    snap.board[19][0] = Color::Cyan.code();

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    let left = fb.get(x0, y0).unwrap();
    let right = fb.get(x0 + 1, y0).unwrap();
    assert_eq!(left.ch, '█');
    assert_eq!(right.ch, '█');
    assert_eq!(left.style.fg, color_rgb(Color::Cyan));

    // Neighbour stays empty.
    assert_ne!(fb.get(x0 + 2, y0).unwrap().ch, '█');
}

#[test]
fn term_view_draws_active_piece_in_its_color() {
    let session = Session::new(ScriptedShapes::new(vec![PieceKind::T]));
    let snap = session.snapshot();

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // T mask [[0,1,0],[1,1,1]] at (3,0): top cell is board col 4, row 0.
    let top = fb.get(1 + 4 * 2, 1).unwrap();
    assert_eq!(top.ch, '█');
    assert_eq!(top.style.fg, color_rgb(Color::Purple));
    assert_ne!(fb.get(1 + 3 * 2, 1).unwrap().ch, '█');
    assert_eq!(fb.get(1 + 3 * 2, 2).unwrap().ch, '█');
}

#[test]
fn term_view_side_panel_shows_score_and_lines() {
    let mut snap = empty_snapshot();
    snap.score = 120;
    snap.lines = 12;

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(60, 22));

    assert!(fb.row_text(0).contains("SCORE"));
    assert!(fb.row_text(1).contains("120"));
    assert!(fb.row_text(3).contains("LINES"));
    assert!(fb.row_text(4).contains("12"));
}

#[test]
fn term_view_narrow_viewport_skips_panel() {
    let mut snap = empty_snapshot();
    snap.score = 120;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    for y in 0..22 {
        assert!(!fb.row_text(y).contains("SCORE"));
    }
}

#[test]
fn term_view_game_over_overlay() {
    let mut snap = empty_snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(!fb.row_text(11).contains("GAME OVER"));

    snap.game_over = true;
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(fb.row_text(11).contains("GAME OVER"));
}

#[test]
fn term_view_tiny_viewport_does_not_panic() {
    let snap = empty_snapshot();
    let view = GameView::default();
    for (w, h) in [(0, 0), (1, 1), (5, 3), (21, 21)] {
        let fb = view.render(&snap, Viewport::new(w, h));
        assert_eq!((fb.width(), fb.height()), (w, h));
    }
}
