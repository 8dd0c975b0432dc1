//! Terminal runner (default binary).
//!
//! Fixed-tick host loop: poll keys, feed the buffered commands to the session,
//! render the board. On game over the overlay stays up until the player
//! restarts or quits.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use blockfall::core::{GameSession, SessionConfig};
use blockfall::input::{host_key, map_key_event, CommandBuffer, HostKey};
use blockfall::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

#[derive(Parser, Debug)]
#[command(name = "blockfall")]
#[command(about = "Falling-block puzzle game in the terminal")]
struct Args {
    /// Session config (JSON); missing fields use the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the config's piece seed
    #[arg(long)]
    seed: Option<u32>,
    /// Write tracing output to this file (filter with RUST_LOG)
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    let config = load_config(&args)?;
    let session = GameSession::new(&config).context("invalid session config")?;

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, session));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn run(term: &mut TerminalRenderer, mut session: GameSession) -> Result<()> {
    session.start();
    tracing::info!("game started");

    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut commands = CommandBuffer::new();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&session, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    match host_key(key) {
                        Some(HostKey::Quit) => return Ok(()),
                        Some(HostKey::Restart) if session.is_game_over() => {
                            session.reset();
                            commands.clear();
                            continue;
                        }
                        _ => {}
                    }
                    if let Some(command) = map_key_event(key) {
                        // Overflowing the per-tick buffer drops the key.
                        commands.push(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let report = session.tick(TICK_MS, commands.as_slice());
            commands.clear();
            if report.lines_cleared > 0 {
                tracing::debug!(lines = report.lines_cleared, "tick cleared lines");
            }
        }
    }
}
