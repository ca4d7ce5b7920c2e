//! Tower of Hanoi engine.
//!
//! The crate holds everything with algorithmic content:
//!
//! - [`GameState`] owns the three pegs, the move counter and the manual-play
//!   selection, and is the only thing that mutates a puzzle.
//! - [`Solver`] produces the optimal move sequence lazily and can suggest the
//!   next move from any legal position.
//! - [`AutoSolve`] steps a solution onto a [`GameState`] one move per call, so
//!   the caller owns the pacing.
//!
//! Rendering, input handling and timing live in the front end.
//!
//! # Example
//!
//! ```rust
//! use hanoi_core::{GameState, Peg, Solver};
//!
//! let mut game = GameState::new(3);
//! for mv in Solver::new().solve(3, Peg::Left, Peg::Right, Peg::Middle) {
//!     game.apply_move(mv.from, mv.to).unwrap();
//! }
//! assert!(game.check_win());
//! assert_eq!(game.move_count(), game.min_moves());
//! ```

mod auto;
mod error;
mod peg;
mod solver;
mod state;

pub use auto::AutoSolve;
pub use error::{InvalidMove, PegIndexError};
pub use peg::{Disk, Move, Peg};
pub use solver::{min_moves, Solution, Solver};
pub use state::{ClickOutcome, GameState, MoveOutcome, MAX_DISKS, MIN_DISKS};
