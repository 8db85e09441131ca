//! Contract-based validation for plays and undos.
//!
//! Contracts formalize Hoare-style reasoning: `{P} action {Q}`. The
//! precondition decides whether the engine accepts an action at all; the
//! postcondition re-checks the engine invariants afterwards.

use super::invariants::{GameInvariants, InvariantSet, InvariantViolation};
use super::{
    Coord, EngineConfig, GameState, InvalidMove, Move, Player, RulesError, TurnPolicy,
};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// What a passed precondition hands to the transition.
    type Checked;

    /// Checks preconditions before applying the action.
    fn pre(&self, state: &S, action: &A) -> Result<Self::Checked, RulesError>;

    /// Checks postconditions after applying the action.
    fn post(&self, before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// An unvalidated request to place a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayRequest {
    /// Requested row.
    pub row: usize,
    /// Requested column.
    pub col: usize,
    /// Player the caller claims is moving.
    pub player: Player,
}

impl PlayRequest {
    /// Creates a new request.
    pub fn new(row: usize, col: usize, player: Player) -> Self {
        Self { row, col, player }
    }
}

// ─────────────────────────────────────────────────────────────
//  Play Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the coordinates are on the board.
pub struct InRange;

impl InRange {
    /// Returns the validated coordinate.
    #[instrument]
    pub fn check(req: &PlayRequest) -> Result<Coord, InvalidMove> {
        Coord::new(req.row, req.col).ok_or(InvalidMove::OutOfRange {
            row: req.row,
            col: req.col,
        })
    }
}

/// Precondition: nobody has won yet.
///
/// A drawn board stays playable: every line is already blocked, so filling
/// the remaining cells cannot change the outcome.
pub struct NoWinnerYet;

impl NoWinnerYet {
    /// Fails once a player has completed a line.
    #[instrument(skip(state))]
    pub fn check(state: &GameState) -> Result<(), InvalidMove> {
        match state.outcome().winner() {
            Some(_) => Err(InvalidMove::GameOver(state.outcome())),
            None => Ok(()),
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails if `coord` already holds a piece.
    #[instrument(skip(state))]
    pub fn check(coord: Coord, state: &GameState) -> Result<(), InvalidMove> {
        if state.board().is_empty(coord) {
            Ok(())
        } else {
            Err(InvalidMove::Occupied(coord))
        }
    }
}

/// Precondition: it is the player's turn, unless the policy is lenient.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails on an out-of-turn play under [`TurnPolicy::Strict`].
    #[instrument(skip(state))]
    pub fn check(player: Player, state: &GameState, policy: TurnPolicy) -> Result<(), InvalidMove> {
        let expected = state.turn();
        match policy {
            TurnPolicy::Strict if player != expected => {
                Err(InvalidMove::OutOfTurn { player, expected })
            }
            _ => Ok(()),
        }
    }
}

/// Precondition: the player still has a piece in their tray.
pub struct PieceAvailable;

impl PieceAvailable {
    /// Fails once the player has placed `tray_size` pieces.
    #[instrument(skip(state))]
    pub fn check(player: Player, state: &GameState, tray_size: usize) -> Result<(), InvalidMove> {
        if state.history().count(player) < tray_size {
            Ok(())
        } else {
            Err(InvalidMove::TrayEmpty(player))
        }
    }
}

/// Composite precondition for a play.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions, in order, and builds the move.
    #[instrument(skip(state, config))]
    pub fn check(
        req: &PlayRequest,
        state: &GameState,
        config: &EngineConfig,
    ) -> Result<Move, InvalidMove> {
        let coord = InRange::check(req)?;
        NoWinnerYet::check(state)?;
        CellIsEmpty::check(coord, state)?;
        PlayersTurn::check(req.player, state, *config.turn_policy())?;
        PieceAvailable::check(req.player, state, *config.pieces_per_player())?;
        Ok(Move::new(req.player, coord))
    }
}

// ─────────────────────────────────────────────────────────────
//  Play / Undo Contracts
// ─────────────────────────────────────────────────────────────

fn invariants_hold(after: &GameState) -> Result<(), Vec<InvariantViolation>> {
    GameInvariants::check_all(after)
}

/// Contract for placing a piece.
///
/// Postconditions: invariants hold and exactly one move was appended.
pub struct PlayContract<'a> {
    config: &'a EngineConfig,
}

impl<'a> PlayContract<'a> {
    /// Creates the contract for the given configuration.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }
}

impl Contract<GameState, PlayRequest> for PlayContract<'_> {
    type Checked = Move;

    fn pre(&self, state: &GameState, action: &PlayRequest) -> Result<Move, RulesError> {
        Ok(LegalMove::check(action, state, self.config)?)
    }

    fn post(&self, before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = invariants_hold(after).err().unwrap_or_default();
        if after.history().len() != before.history().len() + 1 {
            violations.push(InvariantViolation::new("Play appends exactly one move"));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Contract for taking back the latest move.
///
/// Postconditions: invariants hold and the history is the previous one minus
/// its last entry.
pub struct UndoContract;

impl Contract<GameState, ()> for UndoContract {
    type Checked = ();

    fn pre(&self, state: &GameState, _action: &()) -> Result<(), RulesError> {
        if state.history().is_empty() {
            Err(RulesError::NoOpUndo)
        } else {
            Ok(())
        }
    }

    fn post(&self, before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = invariants_hold(after).err().unwrap_or_default();
        let expected = before
            .history()
            .as_slice()
            .split_last()
            .map(|(_, rest)| rest);
        if expected != Some(after.history().as_slice()) {
            violations.push(InvariantViolation::new("Undo pops exactly the last move"));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
