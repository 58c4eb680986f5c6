mod bot;
mod settings;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use nemesis_core::prediction::PredictionModel;
use nemesis_core::{
    ActionJournal, GameConfig, GameSession, HistoryStats, HistoryStore, JsonHistoryFile,
    PlayerAction, SessionStatus, replay_journal,
};
use tracing_subscriber::EnvFilter;

use crate::bot::Bot;
use crate::settings::{load_config, resolve_store_path};

#[derive(Parser)]
#[command(author, version, about = "Headless driver for the nemesis pursuit engine")]
struct Cli {
    /// TOML file overriding game config defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// History store path (defaults to the platform data directory)
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play sessions with the scripted bot, appending each result to the store
    Simulate {
        #[arg(short, long, default_value_t = 10)]
        games: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Sessions still running after this many turns are abandoned
        #[arg(long, default_value_t = 500)]
        max_turns: u32,
        /// Write one replayable journal per session into this directory
        #[arg(short, long)]
        journal_dir: Option<PathBuf>,
    },
    /// Summarize the recorded sessions
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Re-run a journal and check its final snapshot hash
    Replay {
        #[arg(short, long)]
        journal: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let store_path = resolve_store_path(cli.store)?;
    match cli.command {
        Command::Simulate { games, seed, max_turns, journal_dir } => {
            let config = load_config(cli.config.as_deref())?;
            simulate(&config, &store_path, games, seed, max_turns, journal_dir.as_deref())
        }
        Command::Stats { json } => stats(&store_path, json),
        Command::Replay { journal } => replay(&store_path, &journal),
    }
}

fn simulate(
    config: &GameConfig,
    store_path: &Path,
    games: u32,
    first_seed: u64,
    max_turns: u32,
    journal_dir: Option<&Path>,
) -> Result<()> {
    let mut store = JsonHistoryFile::new(store_path);
    if let Some(dir) = journal_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create journal directory: {}", dir.display()))?;
    }

    for game in 0..u64::from(games) {
        let seed = first_seed.wrapping_add(game);
        let records = store.load();
        let model = PredictionModel::build(&records, config.markov_order);
        let mut session = GameSession::new(config.clone(), seed, &model)?;
        let mut journal = ActionJournal::new(seed, config.clone());
        journal.history_len = records.len();
        let mut bot = Bot::new(seed ^ 0x9E37_79B9_7F4A_7C15);

        while !session.status().is_terminal() {
            let action = if session.turn() > max_turns {
                PlayerAction::Quit
            } else {
                bot.choose(session.state())
            };
            journal.push(action);
            session
                .apply_action(action, &mut store)
                .with_context(|| format!("Failed to record session to {}", store_path.display()))?;
        }
        journal.final_snapshot_hash = Some(session.snapshot_hash());

        println!(
            "game {:>3}  seed {:<20}  {:<5}  turns {:>4}  moves {:>4}  traps sprung {}",
            game + 1,
            seed,
            status_label(session.status()),
            session.turn(),
            session.state().moves.len(),
            session.successful_traps(),
        );

        if let Some(dir) = journal_dir {
            let path = dir.join(format!("session-{seed}.json"));
            let json = serde_json::to_string_pretty(&journal)?;
            fs::write(&path, json)
                .with_context(|| format!("Failed to write journal: {}", path.display()))?;
        }
    }

    stats(store_path, false)
}

fn stats(store_path: &Path, json: bool) -> Result<()> {
    let records = JsonHistoryFile::new(store_path).load();
    let stats = HistoryStats::from_records(&records);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Games played:     {}", stats.total);
    println!("Wins:             {}", stats.wins);
    println!("Losses:           {}", stats.losses);
    println!("Quits:            {}", stats.quits);
    println!("Win rate:         {:.1}%", stats.win_rate);
    println!("Avg moves/game:   {:.1}", stats.avg_moves);
    println!("Successful traps: {}", stats.total_traps);
    println!("Avg traps/game:   {:.2}", stats.avg_traps);
    Ok(())
}

fn replay(store_path: &Path, journal_path: &Path) -> Result<()> {
    let journal_data = fs::read_to_string(journal_path)
        .with_context(|| format!("Failed to read journal file: {}", journal_path.display()))?;
    let journal: ActionJournal =
        serde_json::from_str(&journal_data).context("Failed to deserialize journal JSON")?;

    let records = JsonHistoryFile::new(store_path).load();
    if records.len() < journal.history_len {
        bail!(
            "Journal expects a model built from {} records but {} holds only {}",
            journal.history_len,
            store_path.display(),
            records.len()
        );
    }
    let prefix = &records[..journal.history_len];
    let model = PredictionModel::build(prefix, journal.config.markov_order);
    let result = replay_journal(&journal, &model).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Final turn: {}", result.turn);
    println!("Outcome: {}", status_label(result.status));
    println!("Snapshot Hash: {:#018x}", result.snapshot_hash);

    match journal.final_snapshot_hash {
        Some(expected) if expected != result.snapshot_hash => {
            bail!("Snapshot hash mismatch: journal recorded {expected:#018x}")
        }
        Some(_) => println!("Hash matches the recorded session."),
        None => println!("Journal carries no recorded hash to compare against."),
    }
    Ok(())
}

fn status_label(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Playing => "playing",
        SessionStatus::Won => "win",
        SessionStatus::Lost => "loss",
        SessionStatus::Quit => "quit",
    }
}
