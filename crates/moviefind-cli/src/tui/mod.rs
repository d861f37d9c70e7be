//! Interactive search browser.
//!
//! Uses `ratatui` + `crossterm` for rendering. Every edit of the search box
//! is forwarded to a [`SearchSession`]; the screen is redrawn whenever the
//! session publishes a new state.

/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use moviefind_api::catalog::CatalogApi;
use moviefind_search::{SearchSession, SearchSnapshot};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::watch;

use self::state::{BrowserState, KeyAction};

/// How long to wait for a state change before polling the keyboard again.
const TICK: Duration = Duration::from_millis(50);

/// Runs the browser TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<A>(api: A) -> Result<()>
where
    A: CatalogApi + Sync + 'static,
{
    let mut session = SearchSession::start(api, "");
    let mut rx = session.subscribe();
    let mut state = BrowserState::new(rx.borrow_and_update().view());

    enable_raw_mode().context("failed to enable raw mode")?;
    let result = run_on_alternate_screen(&mut state, &mut session, &mut rx).await;

    // Cleanup (always attempt even if event loop failed)
    let restored = restore_terminal(disable_raw_mode, || {
        crossterm::execute!(io::stdout(), LeaveAlternateScreen)
    });

    tracing::debug!(query = session.query(), "browser closed");
    result.and(restored)
}

/// Enters the alternate screen and runs the event loop on it.
async fn run_on_alternate_screen<A>(
    state: &mut BrowserState,
    session: &mut SearchSession<A>,
    rx: &mut watch::Receiver<SearchSnapshot>,
) -> Result<()>
where
    A: CatalogApi + Sync + 'static,
{
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    run_event_loop(&mut terminal, state, session, rx).await
}

/// Runs both terminal cleanup steps and reports the first failure.
fn restore_terminal<D, L>(disable_raw: D, leave_screen: L) -> Result<()>
where
    D: FnOnce() -> io::Result<()>,
    L: FnOnce() -> io::Result<()>,
{
    let disabled = disable_raw().context("failed to disable raw mode");
    let left = leave_screen().context("failed to leave alternate screen");
    disabled.and(left)
}

/// Main event loop.
///
/// Keyboard polling never blocks so spawned lookups keep running on the
/// current-thread runtime while the loop waits on the state channel.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    session: &mut SearchSession<A>,
    rx: &mut watch::Receiver<SearchSnapshot>,
) -> Result<()>
where
    A: CatalogApi + Sync + 'static,
{
    loop {
        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            if let Event::Key(key) = event::read().context("failed to read event")?
                && key.kind == KeyEventKind::Press
            {
                match state.handle_key(key.code, key.modifiers) {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::QueryChanged => {
                        let _pending = session.set_query(state.input.clone());
                    }
                    KeyAction::None => {}
                }
            }
        }

        tokio::select! {
            changed = rx.changed() => {
                changed.context("search state channel closed")?;
                state.set_view(rx.borrow_and_update().view());
            }
            () = tokio::time::sleep(TICK) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_restore_leaves_screen_when_raw_mode_fails() {
        // Arrange
        let left = Cell::new(false);

        // Act
        let result = restore_terminal(
            || Err(io::Error::other("raw mode")),
            || {
                left.set(true);
                Ok(())
            },
        );

        // Assert
        assert!(left.get());
        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("failed to disable raw mode"), "unexpected error: {msg}");
    }

    #[test]
    fn test_restore_reports_first_failure() {
        // Arrange & Act
        let result = restore_terminal(
            || Err(io::Error::other("raw mode")),
            || Err(io::Error::other("screen")),
        );

        // Assert
        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("raw mode"), "unexpected error: {msg}");
        assert!(!msg.contains("screen"), "unexpected error: {msg}");
    }

    #[test]
    fn test_restore_reports_leave_failure() {
        // Arrange & Act
        let result = restore_terminal(|| Ok(()), || Err(io::Error::other("screen")));

        // Assert
        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("failed to leave alternate screen"), "unexpected error: {msg}");
    }

    #[test]
    fn test_restore_ok() {
        // Arrange & Act & Assert
        assert!(restore_terminal(|| Ok(()), || Ok(())).is_ok());
    }
}
