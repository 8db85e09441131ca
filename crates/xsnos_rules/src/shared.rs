//! Thread-safe handle that serializes access to one engine.
//!
//! Every operation takes the same lock for its whole duration, including
//! observer notification, so concurrent or duplicated calls are applied one
//! at a time and nobody observes a half-applied play.

use super::{BoardRulesEngine, EngineConfig, EngineObserver, GameState, Move, Player, RulesError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::instrument;

/// Cloneable, lock-guarded handle to a [`BoardRulesEngine`].
///
/// Observers run while the lock is held; an observer must not call back into
/// the same `SharedEngine`.
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    engine: Arc<Mutex<BoardRulesEngine>>,
}

impl SharedEngine {
    /// Wraps an engine.
    pub fn new(engine: BoardRulesEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// Creates a fresh engine with the given configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self::new(BoardRulesEngine::with_config(config))
    }

    // Observers run after every mutation, so a poisoned engine is still consistent.
    fn lock(&self) -> MutexGuard<'_, BoardRulesEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`BoardRulesEngine::play_move`].
    #[instrument(skip(self))]
    pub fn play_move(&self, row: usize, col: usize, player: Player) -> Result<Move, RulesError> {
        self.lock().play_move(row, col, player)
    }

    /// See [`BoardRulesEngine::undo`].
    #[instrument(skip(self))]
    pub fn undo(&self) -> Result<Move, RulesError> {
        self.lock().undo()
    }

    /// See [`BoardRulesEngine::reset`].
    #[instrument(skip(self))]
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Registers an observer.
    pub fn subscribe(&self, observer: impl EngineObserver + 'static) {
        self.lock().subscribe(observer);
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> GameState {
        self.lock().state().clone()
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut BoardRulesEngine) -> R) -> R {
        f(&mut self.lock())
    }
}
