//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and session state machine. It has no
//! dependencies on terminals, timers, or persistence, making it:
//!
//! - **Deterministic**: a seeded or scripted random source replays a game exactly
//! - **Testable**: every rule is a plain function or a method on owned state
//! - **Portable**: the driver decides how often to tick and how to draw
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven-piece catalog, masks and quarter-turn rotation
//! - [`board`]: 10x20 grid of locked cells and row clearing
//! - [`piece`]: the active piece and the collision rule
//! - [`session`]: the `Running`/`GameOver` state machine and scoring
//! - [`rng`]: injectable random sources
//! - [`snapshot`]: by-value view for renderers
//!
//! # Game Rules
//!
//! - Each spawn is an independent uniform draw from the catalog
//! - Pieces spawn with the mask's top-left cell at (3, 0)
//! - Rotation is rejected if the rotated mask does not fit (no wall kicks)
//! - Cells above the top edge never collide; walls, floor and locked cells do
//! - Each cleared row scores 10 points
//! - The game ends when a new piece cannot be placed after a lock-in
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Session, SimpleRng};
//! use blockfall_types::GameAction;
//!
//! let mut session = Session::new(SimpleRng::new(12345));
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::Rotate);
//! let outcome = session.tick();
//!
//! assert!(outcome.moved);
//! assert_eq!(session.score(), 0);
//! ```

pub mod board;
pub mod piece;
pub mod rng;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use piece::{rotate, would_collide, ActivePiece};
pub use rng::{RandomSource, ScriptedShapes, SimpleRng};
pub use session::{GameOverSink, Session, SessionConfig, SessionState, SpawnCheck, StepOutcome};
pub use shapes::{random_shape, shape, Mask, Shape, CATALOG};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
