//! Terminal blockfall runner (default binary).
//!
//! This is the driver: it owns the gravity timer, maps key presses to session
//! commands, renders snapshots, and wires the session's game-over sink to the
//! score recorder. The engine itself never sees the clock or the terminal.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{RandomSource, Session, SessionConfig, SimpleRng, SpawnCheck};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::scores::{JsonlScoreStore, ScoreConfig, ScoreRecorder};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

/// blockfall - falling-block puzzle in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name recorded with your final score
    #[arg(short, long, default_value = "player")]
    player: String,

    /// Gravity period in milliseconds
    #[arg(short, long, default_value_t = TICK_MS)]
    tick_ms: u32,

    /// Seed for a reproducible piece sequence
    #[arg(short, long)]
    seed: Option<u32>,

    /// High-score file (JSON lines); defaults to BLOCKFALL_SCORES_PATH
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Do not record scores
    #[arg(long)]
    no_scores: bool,

    /// End the game when the just-locked piece's shape is blocked at the spawn
    /// origin, instead of the newly drawn piece
    #[arg(long)]
    legacy_loss_check: bool,

    /// Write logs to this file (the terminal is busy rendering)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.verbose)?;

    let mut score_config = ScoreConfig::from_env();
    if args.no_scores {
        score_config = score_config.with_disabled(true);
    }
    if let Some(path) = args.scores.clone() {
        score_config = score_config.with_path(path);
    }
    let recorder = ScoreRecorder::start_with_config(&score_config)?;

    let spawn_check = if args.legacy_loss_check {
        SpawnCheck::LockedPiece
    } else {
        SpawnCheck::NewPiece
    };
    let config = SessionConfig::new()
        .with_player(args.player.clone())
        .with_spawn_check(spawn_check);
    let tick = Duration::from_millis(args.tick_ms.max(1) as u64);

    tracing::info!(player = %args.player, tick_ms = args.tick_ms, seed = ?args.seed, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = match args.seed {
        Some(seed) => run(&mut term, config, SimpleRng::new(seed), recorder.as_ref(), tick),
        None => run(&mut term, config, rand::rng(), recorder.as_ref(), tick),
    };
    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(recorder) = recorder {
        if let Err(e) = recorder.shutdown(Duration::from_secs(2)) {
            eprintln!("warning: {e}");
        }
        print_high_scores(&score_config.path)?;
    }
    result
}

fn run<R: RandomSource>(
    term: &mut TerminalRenderer,
    config: SessionConfig,
    rng: R,
    recorder: Option<&ScoreRecorder>,
    tick: Duration,
) -> Result<()> {
    let mut session = Session::with_config(config, rng);
    if let Some(recorder) = recorder {
        session.set_sink(Box::new(recorder.sink()));
    }

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&session.snapshot(), Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
            dirty = false;
        }

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        dirty |= session.apply_action(action).changed();
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            let outcome = session.tick();
            dirty |= outcome.changed();
            if outcome.game_over {
                tracing::info!(score = session.score(), "game over, press r to restart");
            }
        }
    }
}

fn init_logging(path: Option<&Path>, verbose: bool) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn print_high_scores(path: &Path) -> Result<()> {
    let top = JsonlScoreStore::new(path).top_blocking(5)?;
    if top.is_empty() {
        return Ok(());
    }
    println!("High scores ({}):", path.display());
    for (i, rec) in top.iter().enumerate() {
        println!("{:>2}. {:<16} {:>6}", i + 1, rec.player, rec.score);
    }
    Ok(())
}
