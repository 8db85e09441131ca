//! Board rules engine for drag-and-drop tic-tac-toe.
//!
//! The engine tracks cell occupancy, detects wins and draws, and keeps an
//! undoable move history. It knows nothing about rendering or input: a
//! presentation layer turns gestures into [`BoardRulesEngine::play_move`]
//! calls and redraws from [`EngineObserver`] notifications.
//!
//! # Example
//!
//! ```
//! use xsnos_rules::{BoardRulesEngine, GameOutcome, Player};
//!
//! let mut engine = BoardRulesEngine::new();
//! engine.play_move(0, 0, Player::X)?;
//! engine.play_move(1, 1, Player::O)?;
//! engine.play_move(0, 1, Player::X)?;
//! engine.play_move(2, 2, Player::O)?;
//! engine.play_move(0, 2, Player::X)?;
//!
//! assert_eq!(engine.outcome(), GameOutcome::XWins);
//! assert_eq!(
//!     engine.transcript().to_string(),
//!     "X->(0,0):O->(1,1):X->(0,1):O->(2,2):X->(0,2)"
//! );
//! # Ok::<(), xsnos_rules::RulesError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
pub mod contracts;
mod engine;
mod history;
pub mod invariants;
mod observer;
mod outcome;
pub mod rules;
mod shared;
mod state;
mod types;

pub use action::{InvalidMove, Move, RulesError};
pub use config::{ConfigError, EngineConfig, TurnPolicy};
pub use engine::BoardRulesEngine;
pub use history::{GameRecord, MAX_MOVES, MoveHistory, Transcript};
pub use observer::{EngineEvent, EngineObserver, EventLog};
pub use outcome::GameOutcome;
pub use shared::SharedEngine;
pub use state::GameState;
pub use types::{Board, Cell, Coord, Player};
