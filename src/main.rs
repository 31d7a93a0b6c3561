//! Terminal falling-blocks runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from
//! `falling_blocks::term`. Set `FALLING_BLOCKS_SEED` for a reproducible piece
//! sequence and `FALLING_BLOCKS_LOG` to a file path to capture tracing output
//! (filtered by `RUST_LOG`, default `info`).

use std::env;
use std::fs::File;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use falling_blocks::core::Session;
use falling_blocks::input::{handle_key_event, should_quit};
use falling_blocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use falling_blocks::types::FRAME_MS;

fn main() -> Result<()> {
    init_logging()?;
    let seed = seed_from_env()?;
    info!(seed, "starting falling-blocks");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to a file: anything written to the terminal would corrupt the
/// alternate screen.
fn init_logging() -> Result<()> {
    match env::var("FALLING_BLOCKS_LOG") {
        Ok(path) => install_log_file(&path),
        Err(_) => Ok(()),
    }
}

fn install_log_file(path: &str) -> Result<()> {
    let log_file = File::create(path).with_context(|| format!("creating log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("installing log subscriber for {path}: {err}"))
}

fn seed_from_env() -> Result<u32> {
    match env::var("FALLING_BLOCKS_SEED") {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("FALLING_BLOCKS_SEED must be a u32, got {raw:?}")),
        Err(_) => {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1);
            Ok(nanos)
        }
    }
}

fn run(term: &mut TerminalRenderer, seed: u32) -> Result<()> {
    let mut session = Session::new(seed);
    let view = GameView::default();

    let mut snap = session.snapshot();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&fb)?;

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!(score = session.score(), "quit");
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        session.apply_command(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with the measured frame time; a slow frame delays gravity but
        // never skips a step.
        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            session.tick(elapsed_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_log_subscriber_is_reported() {
        let path = env::temp_dir().join(format!("falling-blocks-{}.log", std::process::id()));
        let path = path.to_string_lossy().into_owned();

        install_log_file(&path).unwrap();
        let err = install_log_file(&path).unwrap_err();
        assert!(err.to_string().contains("installing log subscriber"));

        let _ = std::fs::remove_file(&path);
    }
}
