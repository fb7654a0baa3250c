//! TUI Application module

mod async_ops;
mod events;
mod state;
mod ui;

pub use state::{AppState, Mode, SelectedField, Tab};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::export::{Exporter, PngSerializer};

use async_ops::{AsyncCommand, AsyncHandle, AsyncResult, spawn_worker};

/// Run the TUI application
pub fn run() -> Result<()> {
    // Create tokio runtime
    let rt = Runtime::new()?;

    // Load config
    let config = Config::load()?;

    let exporter = Exporter::new(
        PngSerializer::from_config(&config),
        config.resolved_export_dir()?,
    );
    tracing::debug!("Exporting to {}", exporter.dir().display());

    // Spawn async worker
    let async_handle = rt.block_on(async { spawn_worker(exporter) });

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut state = AppState::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut state, async_handle);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    mut async_handle: AsyncHandle,
) -> Result<()> {
    loop {
        // Process any async results
        while let Ok(result) = async_handle.result_rx.try_recv() {
            handle_async_result(state, result);
        }

        // Draw UI
        terminal.draw(|frame| ui::render(frame, state))?;

        // Handle events
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(cmd) = events::handle_key(state, key)
        {
            let _ = async_handle.cmd_tx.blocking_send(cmd);
        }

        // Tick for animations
        state.tick();

        if state.should_quit {
            // Shutdown async worker
            let _ = async_handle.cmd_tx.blocking_send(AsyncCommand::Shutdown);
            break;
        }
    }

    // Save config on exit
    state.config.save()?;

    Ok(())
}

fn handle_async_result(state: &mut AppState, result: AsyncResult) {
    state.exports_in_flight = state.exports_in_flight.saturating_sub(1);
    match result {
        AsyncResult::Exported { path } => {
            state.set_status(format!("✅ Saved {}", path.display()));
            state.last_export = Some(path);
        }
        AsyncResult::ExportFailed { error } => {
            state.set_error(format!("❌ Export failed: {error}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_export_result_updates_status() {
        let mut state = AppState::new(Config::default());
        state.exports_in_flight = 2;

        handle_async_result(
            &mut state,
            AsyncResult::Exported {
                path: PathBuf::from("/tmp/tweet.png"),
            },
        );
        assert_eq!(state.exports_in_flight, 1);
        assert!(!state.status_is_error);
        assert_eq!(state.last_export, Some(PathBuf::from("/tmp/tweet.png")));

        let before = state.store.post().clone();
        handle_async_result(
            &mut state,
            AsyncResult::ExportFailed {
                error: "boom".to_string(),
            },
        );
        assert_eq!(state.exports_in_flight, 0);
        assert_eq!(state.status, "❌ Export failed: boom");
        assert!(state.status_is_error);
        assert_eq!(state.last_export, Some(PathBuf::from("/tmp/tweet.png")));
        assert_eq!(state.store.post(), &before);
    }
}
