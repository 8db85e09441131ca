//! Command-line interface for xsnos.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use xsnos_rules::TurnPolicy;

/// Xs-n-Os - headless driver for the tic-tac-toe rules engine
#[derive(Parser, Debug)]
#[command(name = "xsnos")]
#[command(about = "Play tic-tac-toe command scripts through the rules engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured turn policy
    #[arg(long, value_enum, global = true)]
    pub turn_policy: Option<PolicyArg>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command script, printing one transcript line per finished game
    Run {
        /// Script file (`X 0 0`, `undo`, `reset`, one per line)
        script: PathBuf,

        /// Log the board after every command (debug level)
        #[arg(long)]
        show_board: bool,

        /// Print the session summary as JSON after the transcripts
        #[arg(long)]
        summary_json: bool,
    },

    /// Replay a saved game record (JSON) and print its outcome
    Replay {
        /// Game record file
        record: PathBuf,
    },
}

/// Turn policy as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Reject out-of-turn plays
    Strict,
    /// Accept out-of-turn plays
    Lenient,
}

impl From<PolicyArg> for TurnPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => TurnPolicy::Strict,
            PolicyArg::Lenient => TurnPolicy::Lenient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_with_overrides() {
        let cli = Cli::parse_from([
            "xsnos",
            "run",
            "games.txt",
            "--turn-policy",
            "lenient",
            "--show-board",
        ]);
        assert_eq!(cli.turn_policy, Some(PolicyArg::Lenient));
        match cli.command {
            Command::Run {
                script, show_board, ..
            } => {
                assert_eq!(script, PathBuf::from("games.txt"));
                assert!(show_board);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
