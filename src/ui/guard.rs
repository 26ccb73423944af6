//! Terminal lifecycle management.
//!
//! `TerminalGuard` puts the terminal into raw mode on the alternate screen
//! and restores it when dropped, on normal exit as well as during a panic
//! unwind. The panic hook covers the case where the guard is never dropped.
use std::io::stdout;
use std::panic::{set_hook, take_hook};

use anyhow::{Context, Result};
use crossterm::ExecutableCommand;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use log::error;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Terminal type used by the viewer.
pub type Tui = Terminal<CrosstermBackend<std::io::Stdout>>;

/// RAII wrapper for terminal state.
///
/// Holding this value keeps the terminal in raw mode on the alternate
/// screen.
pub struct TerminalGuard;

impl TerminalGuard
{
    /// Enters raw mode and switches to the alternate screen buffer.
    ///
    /// # Errors
    ///
    /// On failure to enter raw mode or switch screens.
    pub fn new() -> Result<Self>
    {
        enable_raw_mode().context("Failed to enable raw mode")?;

        // Build the guard before switching screens so raw mode is undone
        // if the switch fails.
        let guard = Self;
        stdout()
            .execute(EnterAlternateScreen)
            .context("Failed to enter alternate screen")?;

        Ok(guard)
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        restore_terminal();
    }
}

/// Leaves raw mode and the alternate screen, logging failures.
fn restore_terminal()
{
    // Terminal will be borked when failure, at least inform the user
    if let Err(err) = disable_raw_mode()
    {
        error!("Failed to disable raw mode: {err}");
    }

    if let Err(err) = stdout().execute(LeaveAlternateScreen)
    {
        error!("Failed to leave alternate screen: {err}");
    }
}

/// Creates the terminal the viewer draws to.
///
/// Terminal modes are handled by [`TerminalGuard`].
///
/// # Errors
///
/// Returns an error if the terminal size cannot be queried.
pub fn init_tui() -> Result<Tui>
{
    Terminal::new(CrosstermBackend::new(stdout())).context("Failed to create terminal")
}

/// Installs a panic hook that restores the terminal before the default
/// hook prints the panic message.
pub fn init_panic_hook()
{
    let original_hook = take_hook();

    set_hook(Box::new(move |panic_info| {
        restore_terminal();
        error!("Application panicked: {panic_info}");

        original_hook(panic_info);
    }));
}
