// ============================================
// src/main.rs
// Entry point: config, terminal setup and the event loop
// ============================================

use std::io::stdout;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use wortblitz::config::{Cli, Config};
use wortblitz::{CountdownTimer, GameSession, SelectionPolicy, WordStore, input, logging, ui};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli).context("failed to load configuration")?;
    let _log_guard = logging::init(&Config::log_dir(), &config.log_level);
    tracing::info!(?config, "configuration loaded");

    let store = load_vocabulary(&config)?;
    tracing::info!(
        words = store.len(),
        categories = store.categories().len(),
        "vocabulary loaded"
    );

    if cli.check {
        print_summary(&store);
        return Ok(());
    }

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &store, &config);
    // restore even if the game loop failed
    finish(result, restore_terminal())
}

/// The game's own error matters more than a failed terminal restore
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    result?;
    restored
}

fn load_vocabulary(config: &Config) -> Result<WordStore> {
    match &config.vocabulary {
        Some(path) => WordStore::load(path)
            .with_context(|| format!("failed to load vocabulary from {}", path.display())),
        None => WordStore::builtin().context("built-in vocabulary is broken"),
    }
}

fn print_summary(store: &WordStore) {
    println!("{} words OK", store.len());
    for (category, count) in store.categories() {
        println!("  {category}: {count}");
    }
}

fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    let entered = (|| -> Result<_> {
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(Hide)?;
        let backend = CrosstermBackend::new(stdout());
        Ok(Terminal::new(backend)?)
    })();
    if entered.is_err() {
        // don't leave the shell in raw mode
        let _ = restore_terminal();
    }
    entered
}

/// Every step is attempted; the first failure is reported
fn restore_terminal() -> Result<()> {
    let shown = stdout().execute(Show).map(|_| ());
    let left = stdout().execute(LeaveAlternateScreen).map(|_| ());
    let raw_off = disable_raw_mode();
    shown?;
    left?;
    raw_off?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, store: &WordStore, config: &Config) -> Result<()> {
    let mut session = GameSession::new(
        store,
        SelectionPolicy::new(config.seed),
        config.round_seconds,
    );
    let mut timer = CountdownTimer::default();

    loop {
        terminal.draw(|f| ui::draw(f, &session))?;

        // wait for a key, but no longer than the next tick
        if event::poll(timer.timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = input::map_key(&session, key) {
                        if !input::apply(&mut session, action) {
                            break;
                        }
                    }
                }
            }
        }

        let now = Instant::now();
        timer.sync(&session, now);
        timer.fire(&mut session, now);
    }

    tracing::info!("bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_wins_over_restore_error() {
        let err = finish(Err(anyhow::anyhow!("game failed")), Err(anyhow::anyhow!("restore failed")))
            .unwrap_err();
        assert_eq!(err.to_string(), "game failed");
    }

    #[test]
    fn test_restore_error_reported_after_clean_game() {
        let err = finish(Ok(()), Err(anyhow::anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "restore failed");
        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}
