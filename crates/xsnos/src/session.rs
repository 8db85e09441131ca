//! Drives an engine from a command list, acting as the notification layer.
//!
//! After each finished game the session writes the transcript line and
//! resets the board, the way the desktop game shows its end-of-game dialog
//! and starts over.

use crate::script::Command;
use derive_getters::Getters;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info, instrument, warn};
use xsnos_rules::{
    BoardRulesEngine, EngineConfig, EngineEvent, EventLog, GameOutcome, RulesError,
};

/// Totals for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize)]
pub struct SessionSummary {
    /// Games that reached a terminal outcome.
    games_finished: usize,
    /// Games X won.
    x_wins: usize,
    /// Games O won.
    o_wins: usize,
    /// Drawn games.
    draws: usize,
    /// Plays the engine declined.
    rejected_moves: usize,
    /// Undos with nothing to take back.
    ignored_undos: usize,
}

impl SessionSummary {
    fn record(&mut self, outcome: GameOutcome) {
        self.games_finished += 1;
        match outcome {
            GameOutcome::XWins => self.x_wins += 1,
            GameOutcome::OWins => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::InProgress => {}
        }
    }
}

/// A headless game session writing transcripts to `W`.
pub struct Session<W: Write> {
    engine: BoardRulesEngine,
    events: EventLog,
    out: W,
    show_board: bool,
    summary: SessionSummary,
}

impl<W: Write> Session<W> {
    /// Creates a session over a fresh engine.
    #[instrument(skip(out))]
    pub fn new(config: EngineConfig, out: W) -> Self {
        let events = EventLog::new();
        let mut engine = BoardRulesEngine::with_config(config);
        engine.subscribe(events.clone());
        Self {
            engine,
            events,
            out,
            show_board: false,
            summary: SessionSummary::default(),
        }
    }

    /// Logs the board at `debug` level after every command.
    pub fn show_board(mut self, show: bool) -> Self {
        self.show_board = show;
        self
    }

    /// The engine being driven.
    pub fn engine(&self) -> &BoardRulesEngine {
        &self.engine
    }

    /// Totals so far.
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Consumes the session, returning the writer and totals.
    pub fn finish(self) -> (W, SessionSummary) {
        (self.out, self.summary)
    }

    /// Applies one command. Engine rejections are logged and counted, only
    /// output failures are returned.
    #[instrument(skip(self))]
    pub fn execute(&mut self, command: Command) -> std::io::Result<()> {
        match command {
            Command::Play { player, row, col } => {
                match self.engine.play_move(row, col, player) {
                    Ok(mv) => debug!(%mv, turn = %self.engine.turn(), "Played"),
                    Err(e) => {
                        warn!(error = %e, "Move ignored");
                        self.summary.rejected_moves += 1;
                    }
                }
            }
            Command::Undo => match self.engine.undo() {
                Ok(mv) => debug!(%mv, "Undid"),
                Err(RulesError::NoOpUndo) => self.summary.ignored_undos += 1,
                Err(e) => warn!(error = %e, "Undo failed"),
            },
            Command::Reset => self.engine.reset(),
        }

        if self.show_board {
            debug!(board = %format!("\n{}", self.engine.board().display()), "Board");
        }
        self.handle_events()
    }

    /// Applies every command in order.
    #[instrument(skip(self, commands), fields(count = commands.len()))]
    pub fn run(&mut self, commands: &[Command]) -> std::io::Result<&SessionSummary> {
        for command in commands {
            self.execute(*command)?;
        }
        info!(
            games = self.summary.games_finished,
            rejected = self.summary.rejected_moves,
            "Session complete"
        );
        Ok(&self.summary)
    }

    fn handle_events(&mut self) -> std::io::Result<()> {
        for event in self.events.drain() {
            if let EngineEvent::GameEnded {
                outcome,
                transcript,
            } = event
            {
                info!(%outcome, "Game over");
                self.out.write_all(transcript.to_line().as_bytes())?;
                self.out.flush()?;
                self.summary.record(outcome);
                self.engine.reset();
            }
        }
        // Drop the Reset notifications we just caused.
        self.events.drain();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    #[test]
    fn test_transcript_written_then_reset() {
        let commands = parse_script("X 0 0\nO 1 1\nX 0 1\nO 2 2\nX 0 2\n").unwrap();
        let mut session = Session::new(EngineConfig::default(), Vec::new());
        session.run(&commands).unwrap();
        assert!(session.engine().history().is_empty());

        let (out, summary) = session.finish();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "X->(0,0):O->(1,1):X->(0,1):O->(2,2):X->(0,2)\n"
        );
        assert_eq!(*summary.x_wins(), 1);
        assert_eq!(*summary.games_finished(), 1);
    }

    #[test]
    fn test_rejections_and_noop_undo_counted() {
        let commands = parse_script("undo\nX 5 0\nX 0 0\nX 0 0\nO 0 0\n").unwrap();
        let mut session = Session::new(EngineConfig::default(), Vec::new());
        let summary = session.run(&commands).unwrap().clone();
        assert_eq!(*summary.ignored_undos(), 1);
        assert_eq!(*summary.rejected_moves(), 3);
        assert_eq!(session.engine().history().len(), 1);
    }
}
