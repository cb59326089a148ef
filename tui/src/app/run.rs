use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use housing::AppContext;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::ui::screens::{
    dashboard::{self, DashboardState},
    Action,
};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("cannot enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the page until the user quits.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub fn run(ctx: AppContext) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut state = DashboardState::new(ctx);

    loop {
        terminal.draw(|f| dashboard::draw(f, &state))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if dashboard::handle_key(&mut state, k.code) == Action::Quit {
                    break;
                }
            }
        }
    }

    info!("session closed");
    terminal.show_cursor()?;
    Ok(())
}
