//! Command scripts: one engine command per line.
//!
//! ```text
//! # comments and blank lines are skipped
//! X 0 0
//! O 1,1
//! undo
//! reset
//! ```

use derive_more::Error;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, instrument};
use xsnos_rules::Player;

/// A command for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place a piece.
    Play {
        /// Player placing the piece.
        player: Player,
        /// Target row.
        row: usize,
        /// Target column.
        col: usize,
    },
    /// Take back the latest move.
    Undo,
    /// Start a new game.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(ascii_case_insensitive)]
enum Keyword {
    Undo,
    Reset,
}

/// Script read or parse error.
#[derive(Debug, Clone, Error)]
pub struct ScriptError {
    /// Error message.
    pub message: String,
    /// 1-based script line that failed, `None` when the script could not be read.
    pub script_line: Option<usize>,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ScriptError {
    /// Creates a new script error for the given script line.
    #[track_caller]
    pub fn new(script_line: usize, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            script_line: Some(script_line),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates an error for a script that could not be read at all.
    #[track_caller]
    pub fn unreadable(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            script_line: None,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.script_line {
            Some(n) => write!(f, "Script error on line {n}: ")?,
            None => f.write_str("Script error: ")?,
        }
        write!(f, "{} ({}:{})", self.message, self.file, self.line)
    }
}

/// Parses one line. `Ok(None)` for blank lines and comments.
#[instrument]
pub fn parse_line(number: usize, line: &str) -> Result<Option<Command>, ScriptError> {
    let text = line.split('#').next().unwrap_or_default().trim();
    if text.is_empty() {
        return Ok(None);
    }

    let tokens: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    match tokens.as_slice() {
        [word] => match Keyword::from_str(word) {
            Ok(Keyword::Undo) => Ok(Some(Command::Undo)),
            Ok(Keyword::Reset) => Ok(Some(Command::Reset)),
            Err(_) => Err(ScriptError::new(number, format!("unknown command '{word}'"))),
        },
        [player, row, col] => {
            let player = Player::from_str(player)
                .map_err(|_| ScriptError::new(number, format!("unknown player '{player}'")))?;
            let row = row
                .parse()
                .map_err(|_| ScriptError::new(number, format!("bad row '{row}'")))?;
            let col = col
                .parse()
                .map_err(|_| ScriptError::new(number, format!("bad column '{col}'")))?;
            Ok(Some(Command::Play { player, row, col }))
        }
        _ => Err(ScriptError::new(
            number,
            format!("expected '<player> <row> <col>', 'undo' or 'reset', got '{text}'"),
        )),
    }
}

/// Parses a whole script.
#[instrument(skip(source), fields(bytes = source.len()))]
pub fn parse_script(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (i, line) in source.lines().enumerate() {
        if let Some(command) = parse_line(i + 1, line)? {
            commands.push(command);
        }
    }
    debug!(count = commands.len(), "Parsed script");
    Ok(commands)
}

/// Reads and parses a script file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Command>, ScriptError> {
    let source = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ScriptError::unreadable(format!("Failed to read script: {e}")))?;
    parse_script(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_with_spaces_and_commas() {
        assert_eq!(
            parse_line(1, "X 0 2").unwrap(),
            Some(Command::Play {
                player: Player::X,
                row: 0,
                col: 2
            })
        );
        assert_eq!(
            parse_line(1, "o 1,1").unwrap(),
            Some(Command::Play {
                player: Player::O,
                row: 1,
                col: 1
            })
        );
    }

    #[test]
    fn test_out_of_range_still_parses() {
        // Range is the engine's call, not the parser's.
        assert_eq!(
            parse_line(1, "X 5 0").unwrap(),
            Some(Command::Play {
                player: Player::X,
                row: 5,
                col: 0
            })
        );
    }

    #[test]
    fn test_keywords_and_comments() {
        assert_eq!(parse_line(1, "UNDO").unwrap(), Some(Command::Undo));
        assert_eq!(parse_line(1, " reset # new game").unwrap(), Some(Command::Reset));
        assert_eq!(parse_line(1, "   # nothing").unwrap(), None);
        assert_eq!(parse_line(1, "").unwrap(), None);
    }

    #[test]
    fn test_errors_name_the_line() {
        let err = parse_script("X 0 0\nZ 1 1\n").unwrap_err();
        assert_eq!(err.script_line, Some(2));
        assert!(err.message.contains("unknown player"));

        let err = parse_script("X 0\n").unwrap_err();
        assert_eq!(err.script_line, Some(1));
        assert!(err.to_string().starts_with("Script error on line 1: "));

        let err = parse_script("X a 0").unwrap_err();
        assert!(err.message.contains("bad row"));
    }

    #[test]
    fn test_unreadable_script_has_no_line() {
        let err = load_script("/nonexistent/xsnos-script.txt").unwrap_err();
        assert_eq!(err.script_line, None);
        assert!(err.to_string().starts_with("Script error: Failed to read script"));
        assert!(!err.to_string().contains("line 0"));
    }
}
