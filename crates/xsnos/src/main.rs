//! Xs-n-Os command-line driver.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use xsnos::cli::{Cli, Command};
use xsnos::{Session, load_script};
use xsnos_rules::{BoardRulesEngine, EngineConfig, GameRecord};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.turn_policy.map(Into::into))?;

    match cli.command {
        Command::Run {
            script,
            show_board,
            summary_json,
        } => run_script(&script, config, show_board, summary_json),
        Command::Replay { record } => replay_record(&record, config),
    }
}

/// Resolves the engine configuration from file and command-line override.
#[instrument]
fn load_config(
    path: Option<&Path>,
    turn_policy: Option<xsnos_rules::TurnPolicy>,
) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    Ok(match turn_policy {
        Some(policy) => config.with_turn_policy(policy),
        None => config,
    })
}

/// Plays a script, printing transcripts to stdout.
#[instrument(skip(config))]
fn run_script(
    script: &Path,
    config: EngineConfig,
    show_board: bool,
    summary_json: bool,
) -> Result<()> {
    let commands =
        load_script(script).with_context(|| format!("loading script {}", script.display()))?;
    info!(commands = commands.len(), turn_policy = %config.turn_policy(), "Running script");

    let stdout = std::io::stdout().lock();
    let mut session = Session::new(config, stdout).show_board(show_board);
    session.run(&commands).context("writing transcripts")?;
    let (mut stdout, summary) = session.finish();

    if summary_json {
        serde_json::to_writer_pretty(&mut stdout, &summary)?;
        writeln!(stdout)?;
    }
    Ok(())
}

/// Replays a saved game and prints its outcome and transcript.
#[instrument(skip(config))]
fn replay_record(path: &Path, config: EngineConfig) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading record {}", path.display()))?;
    let record = GameRecord::from_json(&json).context("parsing game record")?;

    let mut engine = BoardRulesEngine::with_config(config);
    let outcome = engine
        .replay(&record.moves)
        .with_context(|| format!("move {} of the record", engine.history().len() + 1))?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{outcome}")?;
    stdout.write_all(engine.transcript().to_line().as_bytes())?;
    Ok(())
}
