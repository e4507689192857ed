//! Game session - the state machine driven by tick/move/rotate commands
//!
//! A session owns one board and one active piece. Every command runs to
//! completion and reports what happened through a [`StepOutcome`]; rejected
//! transforms and commands issued after game over leave the state untouched.

use std::fmt;

use crate::board::Board;
use crate::piece::{would_collide, ActivePiece};
use crate::rng::{RandomSource, SimpleRng};
use crate::shapes::random_shape;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Direction, GameAction, POINTS_PER_ROW, SPAWN_X, SPAWN_Y};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    GameOver,
}

/// Which mask the loss check tests at the spawn origin after a lock-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnCheck {
    /// The freshly drawn piece (a blocked spawn ends the game).
    #[default]
    NewPiece,
    /// The piece that was just locked, in its locked orientation.
    ///
    /// Legacy rule: a game can end even though the new piece fits, or run on
    /// with a blocked spawn.
    LockedPiece,
}

/// Per-session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Reported to the game-over sink with the final score.
    pub player: String,
    pub spawn_check: SpawnCheck,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player: "player".to_string(),
            spawn_check: SpawnCheck::NewPiece,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = player.into();
        self
    }

    pub fn with_spawn_check(mut self, spawn_check: SpawnCheck) -> Self {
        self.spawn_check = spawn_check;
        self
    }
}

/// Receives the final score when a session ends.
///
/// Called at most once per play (a restart re-arms it). Implementations must
/// not block: the call happens inside the command that ended the game.
pub trait GameOverSink {
    fn on_game_over(&mut self, final_score: u32, player: &str);
}

/// What a single command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// The active piece moved or rotated.
    pub moved: bool,
    /// The active piece was locked into the board.
    pub locked: bool,
    /// Rows removed by this lock-in.
    pub rows_cleared: u32,
    /// This command ended the game.
    pub game_over: bool,
}

impl StepOutcome {
    fn moved() -> Self {
        Self {
            moved: true,
            ..Self::default()
        }
    }

    /// Whether the board or the active piece changed.
    pub fn changed(&self) -> bool {
        self.moved || self.locked || self.game_over
    }
}

/// One play of the game.
pub struct Session<R = SimpleRng> {
    board: Board,
    active: ActivePiece,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    state: SessionState,
    config: SessionConfig,
    rng: R,
    sink: Option<Box<dyn GameOverSink>>,
}

impl<R: RandomSource> Session<R> {
    /// Start a session on an empty board with default settings.
    pub fn new(rng: R) -> Self {
        Self::with_config(SessionConfig::default(), rng)
    }

    pub fn with_config(config: SessionConfig, rng: R) -> Self {
        Self::with_board(Board::new(), config, rng)
    }

    /// Start a session on a prepared board.
    ///
    /// The session always starts running. A first piece spawned over locked
    /// cells locks in place on the first tick, and the loss check after that
    /// lock-in ends the game.
    pub fn with_board(board: Board, config: SessionConfig, mut rng: R) -> Self {
        let active = ActivePiece::spawn(random_shape(&mut rng));
        Self {
            board,
            active,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            state: SessionState::Running,
            config,
            rng,
            sink: None,
        }
    }

    /// Attach the collaborator notified on game over.
    pub fn with_sink(mut self, sink: impl GameOverSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn set_sink(&mut self, sink: Box<dyn GameOverSink>) {
        self.sink = Some(sink);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this play.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// Dispatch a driver action.
    pub fn apply_action(&mut self, action: GameAction) -> StepOutcome {
        match action {
            GameAction::MoveLeft => self.move_horizontal(Direction::Left),
            GameAction::MoveRight => self.move_horizontal(Direction::Right),
            GameAction::SoftDrop => self.tick(),
            GameAction::Rotate => self.rotate(),
            GameAction::Restart => {
                self.restart();
                StepOutcome::moved()
            }
        }
    }

    /// Shift the active piece one column, if the target is free.
    pub fn move_horizontal(&mut self, direction: Direction) -> StepOutcome {
        if self.game_over() {
            return StepOutcome::default();
        }
        self.try_replace(self.active.shifted(direction.dx(), 0))
    }

    /// Rotate the active piece in place, if the rotated mask fits.
    pub fn rotate(&mut self) -> StepOutcome {
        if self.game_over() {
            return StepOutcome::default();
        }
        self.try_replace(self.active.rotated())
    }

    /// Gravity step: fall one row, or lock in when blocked.
    ///
    /// A piece that already overlaps locked cells (a blocked spawn) is
    /// blocked regardless of what lies below it.
    pub fn tick(&mut self) -> StepOutcome {
        if self.game_over() {
            return StepOutcome::default();
        }
        let fallen = self.active.shifted(0, 1);
        if !self.active.collides(&self.board) && !fallen.collides(&self.board) {
            self.active = fallen;
            return StepOutcome::moved();
        }
        self.lock_in()
    }

    /// Start a fresh play in place: empty board, score 0, new piece.
    pub fn restart(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.state = SessionState::Running;
        self.active = ActivePiece::spawn(random_shape(&mut self.rng));
        tracing::debug!(player = %self.config.player, "session restarted");
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = Some(ActiveSnapshot::from(self.active));
        out.score = self.score;
        out.lines = self.lines;
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn try_replace(&mut self, candidate: ActivePiece) -> StepOutcome {
        if candidate.collides(&self.board) {
            return StepOutcome::default();
        }
        self.active = candidate;
        StepOutcome::moved()
    }

    fn lock_in(&mut self) -> StepOutcome {
        let locked = self.active;
        self.board.lock(&locked);
        self.pieces_locked += 1;

        let cleared = self.board.clear_full_rows();
        self.lines += cleared;
        self.score += cleared * POINTS_PER_ROW;

        tracing::debug!(
            kind = locked.kind.as_str(),
            x = locked.x,
            y = locked.y,
            rows_cleared = cleared,
            score = self.score,
            "piece locked"
        );

        self.active = ActivePiece::spawn(random_shape(&mut self.rng));

        let check_mask = match self.config.spawn_check {
            SpawnCheck::NewPiece => &self.active.mask,
            SpawnCheck::LockedPiece => &locked.mask,
        };
        let lost = would_collide(check_mask, SPAWN_X, SPAWN_Y, &self.board);
        if lost {
            self.enter_game_over();
        }

        StepOutcome {
            moved: false,
            locked: true,
            rows_cleared: cleared,
            game_over: lost,
        }
    }

    fn enter_game_over(&mut self) {
        self.state = SessionState::GameOver;
        tracing::info!(
            player = %self.config.player,
            score = self.score,
            lines = self.lines,
            "game over"
        );
        if let Some(sink) = self.sink.as_mut() {
            sink.on_game_over(self.score, &self.config.player);
        }
    }
}

impl<R> fmt::Debug for Session<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("board", &self.board)
            .field("active", &self.active)
            .field("score", &self.score)
            .field("lines", &self.lines)
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::rng::ScriptedShapes;
    use crate::types::{Color, PieceKind};

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<(u32, String)>>>);

    impl GameOverSink for Recorder {
        fn on_game_over(&mut self, final_score: u32, player: &str) {
            self.0.borrow_mut().push((final_score, player.to_string()));
        }
    }

    fn scripted(kinds: &[PieceKind]) -> Session<ScriptedShapes> {
        Session::new(ScriptedShapes::new(kinds.to_vec()))
    }

    #[test]
    fn new_session_is_running_with_zero_score() {
        let s = scripted(&[PieceKind::T]);
        assert_eq!(s.state(), SessionState::Running);
        assert_eq!(s.score(), 0);
        assert_eq!(s.active().kind, PieceKind::T);
        assert_eq!((s.active().x, s.active().y), (3, 0));
        assert_eq!(s.board().occupied_count(), 0);
    }

    #[test]
    fn blocked_horizontal_move_is_silently_rejected() {
        let mut s = scripted(&[PieceKind::I]);
        for _ in 0..3 {
            assert!(s.move_horizontal(Direction::Left).moved);
        }
        assert_eq!(s.active().x, 0);
        let before = *s.active();
        assert_eq!(s.move_horizontal(Direction::Left), StepOutcome::default());
        assert_eq!(*s.active(), before);
    }

    #[test]
    fn rotation_rejected_against_floor() {
        let mut s = scripted(&[PieceKind::I]);
        for _ in 0..19 {
            s.tick();
        }
        assert_eq!(s.active().y, 19);
        // Vertical I would reach row 22.
        assert!(!s.rotate().moved);
        assert_eq!(s.active().mask.rows(), 1);
    }

    #[test]
    fn sink_fires_once_with_final_score() {
        let rec = Recorder::default();
        let mut board = Board::new();
        board.set(2, 3, Some(Color::Red));
        board.set(2, 4, Some(Color::Red));
        let mut s = Session::with_board(
            board,
            SessionConfig::new().with_player("ada"),
            ScriptedShapes::new(vec![PieceKind::O]),
        )
        .with_sink(rec.clone());

        let out = s.tick();
        assert!(out.locked && out.game_over);
        assert!(s.game_over());

        s.tick();
        s.rotate();
        s.move_horizontal(Direction::Right);
        assert_eq!(rec.0.borrow().as_slice(), &[(0, "ada".to_string())]);
    }

    #[test]
    fn restart_rearms_session() {
        let rec = Recorder::default();
        let mut board = Board::new();
        board.set(2, 3, Some(Color::Red));
        let mut s = Session::with_board(
            board,
            SessionConfig::default(),
            ScriptedShapes::new(vec![PieceKind::O]),
        )
        .with_sink(rec.clone());
        s.tick();
        assert!(s.game_over());

        s.apply_action(GameAction::Restart);
        assert_eq!(s.state(), SessionState::Running);
        assert_eq!(s.score(), 0);
        assert_eq!(s.board().occupied_count(), 0);
        assert_eq!((s.active().x, s.active().y), (3, 0));
        assert_eq!(rec.0.borrow().len(), 1);
    }

    #[test]
    fn blocked_first_spawn_ends_game_on_first_tick() {
        let rec = Recorder::default();
        let mut board = Board::new();
        board.set(0, 3, Some(Color::Red));
        let mut s = Session::with_board(
            board,
            SessionConfig::new().with_player("ada"),
            ScriptedShapes::new(vec![PieceKind::O]),
        )
        .with_sink(rec.clone());
        assert_eq!(s.state(), SessionState::Running);

        // Nothing lies below the O, but it already overlaps (0, 3).
        let out = s.tick();
        assert!(out.locked && out.game_over);
        assert_eq!(out.rows_cleared, 0);
        assert_eq!(s.board().get(0, 3), Some(Some(Color::Yellow)));

        assert_eq!(s.tick(), StepOutcome::default());
        assert_eq!(rec.0.borrow().as_slice(), &[(0, "ada".to_string())]);
    }

    #[test]
    fn outcome_changed_tracks_visible_effects() {
        let mut s = scripted(&[PieceKind::I]);
        while s.move_horizontal(Direction::Left).moved {}
        assert!(!s.move_horizontal(Direction::Left).changed());
        assert!(s.tick().changed());
        assert!(s.apply_action(GameAction::Restart).changed());

        let locked = StepOutcome {
            locked: true,
            ..StepOutcome::default()
        };
        assert!(locked.changed());
        assert!(!StepOutcome::default().changed());
    }
}
