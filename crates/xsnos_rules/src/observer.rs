//! Outbound notifications from the engine.
//!
//! Observers are called after the engine has finished updating its state, so
//! the [`GameState`] they receive is always the complete post-transition view.

use super::{GameOutcome, GameState, Move, Transcript};
use std::sync::{Arc, Mutex, PoisonError};

/// Receives engine notifications. Every method defaults to doing nothing.
pub trait EngineObserver: Send {
    /// A play was accepted.
    fn on_move_accepted(&mut self, _mv: &Move, _state: &GameState) {}

    /// The latest move was taken back.
    fn on_move_undone(&mut self, _mv: &Move, _state: &GameState) {}

    /// A play produced a terminal outcome.
    fn on_game_ended(&mut self, _outcome: GameOutcome, _state: &GameState) {}

    /// The board was cleared.
    fn on_reset(&mut self, _state: &GameState) {}
}

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A play was accepted.
    MoveAccepted(Move),
    /// The latest move was taken back.
    MoveUndone(Move),
    /// The game ended.
    GameEnded {
        /// Terminal outcome.
        outcome: GameOutcome,
        /// Moves of the finished game.
        transcript: Transcript,
    },
    /// The board was cleared.
    Reset,
}

/// Observer that records every notification.
///
/// Clones share one log, so a caller keeps a clone and hands another to the
/// engine.
///
/// The log keeps every event until [`EventLog::drain`] is called. A
/// long-running caller must drain it after each batch of commands, otherwise
/// it grows with every play.
///
/// ```
/// use xsnos_rules::{BoardRulesEngine, EventLog, Player};
///
/// let log = EventLog::new();
/// let mut engine = BoardRulesEngine::new();
/// engine.subscribe(log.clone());
/// engine.play_move(1, 1, Player::X)?;
///
/// assert_eq!(log.drain().len(), 1);
/// assert!(log.events().is_empty());
/// # Ok::<(), xsnos_rules::RulesError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: EngineEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<EngineEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Copies everything recorded so far.
    pub fn events(&self) -> Vec<EngineEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EngineObserver for EventLog {
    fn on_move_accepted(&mut self, mv: &Move, _state: &GameState) {
        self.push(EngineEvent::MoveAccepted(*mv));
    }

    fn on_move_undone(&mut self, mv: &Move, _state: &GameState) {
        self.push(EngineEvent::MoveUndone(*mv));
    }

    fn on_game_ended(&mut self, outcome: GameOutcome, state: &GameState) {
        self.push(EngineEvent::GameEnded {
            outcome,
            transcript: state.history().transcript(),
        });
    }

    fn on_reset(&mut self, _state: &GameState) {
        self.push(EngineEvent::Reset);
    }
}
