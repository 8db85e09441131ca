//! The board rules engine.
//!
//! Owns the board and move history, validates plays through
//! [`PlayContract`], and notifies observers once a transition is complete.

use super::contracts::{Contract, PlayContract, PlayRequest, UndoContract};
use super::invariants::InvariantViolation;
use super::{
    Board, Cell, EngineConfig, EngineObserver, GameOutcome, GameState, Move, MoveHistory, Player,
    RulesError, Transcript,
};
use tracing::{debug, error, info, instrument, warn};

/// Tic-tac-toe rules engine with undoable history.
///
/// Each instance is an independent game; nothing is shared between engines.
pub struct BoardRulesEngine {
    config: EngineConfig,
    state: GameState,
    observers: Vec<Box<dyn EngineObserver>>,
}

impl BoardRulesEngine {
    /// Creates an engine with the default (strict) configuration.
    #[instrument]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with the given configuration.
    #[instrument]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            state: GameState::new(),
            observers: Vec::new(),
        }
    }

    /// Registers an observer for all future notifications.
    pub fn subscribe(&mut self, observer: impl EngineObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Clears the board and history; X moves first.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state.clear();
        info!("Board reset");
        for observer in &mut self.observers {
            observer.on_reset(&self.state);
        }
    }

    /// Places `player`'s piece at `(row, col)`.
    ///
    /// On rejection the state is untouched. On success observers see the
    /// accepted move, then the terminal outcome if this play ended the game.
    /// `GameEnded` fires once per game, on the play that reaches a terminal
    /// outcome; filling the last cells of an early draw does not repeat it.
    #[instrument(skip(self), fields(turn = %self.state.turn()))]
    pub fn play_move(&mut self, row: usize, col: usize, player: Player) -> Result<Move, RulesError> {
        let contract = PlayContract::new(&self.config);
        let mv = contract
            .pre(&self.state, &PlayRequest::new(row, col, player))
            .inspect_err(|e| warn!(error = %e, "Play rejected"))?;

        let was_terminal = self.state.outcome().is_terminal();
        let before = cfg!(debug_assertions).then(|| self.state.clone());
        self.state.apply(mv);
        if let Some(before) = before {
            report_violations("play", contract.post(&before, &self.state));
        }

        let outcome = self.state.outcome();
        debug!(%mv, %outcome, "Move accepted");
        for observer in &mut self.observers {
            observer.on_move_accepted(&mv, &self.state);
        }
        if outcome.is_terminal() && !was_terminal {
            info!(%outcome, transcript = %self.state.history().transcript(), "Game ended");
            for observer in &mut self.observers {
                observer.on_game_ended(outcome, &self.state);
            }
        }
        Ok(mv)
    }

    /// Takes back the latest move.
    ///
    /// Returns [`RulesError::NoOpUndo`] with the state untouched when there
    /// is nothing to undo.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<Move, RulesError> {
        UndoContract
            .pre(&self.state, &())
            .inspect_err(|_| debug!("Undo with empty history ignored"))?;

        let before = cfg!(debug_assertions).then(|| self.state.clone());
        let mv = self.state.revert().ok_or(RulesError::NoOpUndo)?;
        if let Some(before) = before {
            report_violations("undo", UndoContract.post(&before, &self.state));
        }

        debug!(%mv, turn = %self.state.turn(), outcome = %self.state.outcome(), "Move undone");
        for observer in &mut self.observers {
            observer.on_move_undone(&mv, &self.state);
        }
        Ok(mv)
    }

    /// Resets, then plays `moves` in order, stopping at the first rejection.
    #[instrument(skip(self, moves), fields(moves = moves.len()))]
    pub fn replay(&mut self, moves: &[Move]) -> Result<GameOutcome, RulesError> {
        self.reset();
        for mv in moves {
            self.play_move(mv.row(), mv.col(), mv.player)?;
        }
        Ok(self.outcome())
    }

    /// Cell at `(row, col)`, or `None` off the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.state.cell(row, col)
    }

    /// Player to move next.
    pub fn turn(&self) -> Player {
        self.state.turn()
    }

    /// Current outcome.
    pub fn outcome(&self) -> GameOutcome {
        self.state.outcome()
    }

    /// Moves played so far.
    pub fn history(&self) -> &MoveHistory {
        self.state.history()
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// Complete game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pieces still in the player's tray.
    pub fn pieces_remaining(&self, player: Player) -> usize {
        self.config
            .pieces_per_player()
            .saturating_sub(self.state.history().count(player))
    }

    /// Transcript of the current game.
    pub fn transcript(&self) -> Transcript {
        self.state.history().transcript()
    }
}

fn report_violations(operation: &str, result: Result<(), Vec<InvariantViolation>>) {
    if let Err(violations) = result {
        for violation in &violations {
            error!(operation, invariant = %violation.description, "Postcondition failed");
        }
        debug_assert!(violations.is_empty(), "{operation} broke engine invariants");
    }
}

impl Default for BoardRulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BoardRulesEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardRulesEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineEvent, EventLog, InvalidMove, TurnPolicy};

    #[test]
    fn test_new_engine_x_to_move() {
        let engine = BoardRulesEngine::new();
        assert_eq!(engine.turn(), Player::X);
        assert_eq!(engine.outcome(), GameOutcome::InProgress);
        assert!(engine.history().is_empty());
        assert_eq!(engine.pieces_remaining(Player::O), 6);
    }

    #[test]
    fn test_play_flips_turn() {
        let mut engine = BoardRulesEngine::new();
        engine.play_move(1, 1, Player::X).unwrap();
        assert_eq!(engine.turn(), Player::O);
        assert_eq!(engine.cell(1, 1), Some(Cell::Occupied(Player::X)));
        assert_eq!(engine.pieces_remaining(Player::X), 5);
    }

    #[test]
    fn test_strict_rejects_out_of_turn() {
        let mut engine = BoardRulesEngine::new();
        let err = engine.play_move(0, 0, Player::O).unwrap_err();
        assert_eq!(
            err,
            RulesError::InvalidMove(InvalidMove::OutOfTurn {
                player: Player::O,
                expected: Player::X
            })
        );
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_lenient_accepts_out_of_turn() {
        let config = EngineConfig::default().with_turn_policy(TurnPolicy::Lenient);
        let mut engine = BoardRulesEngine::with_config(config);
        engine.play_move(0, 0, Player::X).unwrap();
        engine.play_move(0, 1, Player::X).unwrap();
        assert_eq!(engine.turn(), Player::O);
        engine.undo().unwrap();
        assert_eq!(engine.turn(), Player::O);
        engine.undo().unwrap();
        assert_eq!(engine.turn(), Player::X);
    }

    #[test]
    fn test_play_after_game_end_rejected_until_undo() {
        let mut engine = BoardRulesEngine::new();
        for (r, c, p) in [
            (0, 0, Player::X),
            (1, 0, Player::O),
            (0, 1, Player::X),
            (1, 1, Player::O),
            (0, 2, Player::X),
        ] {
            engine.play_move(r, c, p).unwrap();
        }
        assert_eq!(engine.outcome(), GameOutcome::XWins);
        assert_eq!(
            engine.play_move(2, 2, Player::O),
            Err(RulesError::InvalidMove(InvalidMove::GameOver(
                GameOutcome::XWins
            )))
        );
        engine.undo().unwrap();
        assert_eq!(engine.outcome(), GameOutcome::InProgress);
        assert_eq!(engine.turn(), Player::X);
        assert!(engine.play_move(2, 2, Player::X).is_ok());
    }

    #[test]
    fn test_observers_see_complete_state() {
        struct Check;
        impl EngineObserver for Check {
            fn on_move_accepted(&mut self, mv: &Move, state: &GameState) {
                assert_eq!(state.history().last(), Some(mv));
                assert_eq!(state.board().get(mv.coord), Cell::Occupied(mv.player));
                assert_eq!(state.turn(), mv.player.opponent());
            }
        }

        let mut engine = BoardRulesEngine::new();
        engine.subscribe(Check);
        engine.play_move(0, 0, Player::X).unwrap();
        engine.play_move(2, 2, Player::O).unwrap();
    }

    #[test]
    fn test_event_order_on_win() {
        let log = EventLog::new();
        let mut engine = BoardRulesEngine::new();
        engine.subscribe(log.clone());
        for (r, c, p) in [
            (0, 0, Player::X),
            (1, 1, Player::O),
            (0, 1, Player::X),
            (2, 2, Player::O),
            (0, 2, Player::X),
        ] {
            engine.play_move(r, c, p).unwrap();
        }
        let events = log.drain();
        assert_eq!(events.len(), 6);
        assert_eq!(
            events[4],
            EngineEvent::MoveAccepted(engine.history().as_slice()[4])
        );
        match &events[5] {
            EngineEvent::GameEnded {
                outcome,
                transcript,
            } => {
                assert_eq!(*outcome, GameOutcome::XWins);
                assert_eq!(
                    transcript.to_string(),
                    "X->(0,0):O->(1,1):X->(0,1):O->(2,2):X->(0,2)"
                );
            }
            other => panic!("expected GameEnded, got {other:?}"),
        }
        engine.reset();
        assert_eq!(log.drain(), vec![EngineEvent::Reset]);
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let log = EventLog::new();
        let mut engine = BoardRulesEngine::new();
        engine.subscribe(log.clone());
        assert_eq!(engine.undo(), Err(RulesError::NoOpUndo));
        assert!(log.events().is_empty());
        assert_eq!(engine.state(), &GameState::new());
    }

    #[test]
    fn test_replay_stops_at_rejection() {
        let mut engine = BoardRulesEngine::new();
        let moves = [
            Move::new(Player::X, crate::Coord::at(0, 0)),
            Move::new(Player::X, crate::Coord::at(0, 1)),
        ];
        assert!(engine.replay(&moves).is_err());
        assert_eq!(engine.history().len(), 1);
    }
}
