// SPDX-License-Identifier: PMPL-1.0-or-later

//! Crossterm-backed screen state handling for windowed callers

use crate::dispatch::Screen;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::stdout;

/// Screen handle for a full-screen terminal application.
///
/// Suspend drops back to the caller's original screen so the backend can
/// use the terminal; resume returns to the alternate screen.
pub struct TermScreen;

impl TermScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TermScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for TermScreen {
    fn suspend(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        execute!(stdout(), EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        Ok(())
    }
}

/// Screen handle for callers already on the plain shell screen.
///
/// There is no saved display to restore: the backend can use the terminal
/// directly, so suspend and resume touch nothing. Using [`TermScreen`]
/// from such a caller would end by entering an alternate screen and raw
/// mode it never owned.
pub struct InlineScreen;

impl InlineScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InlineScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for InlineScreen {
    fn suspend(&mut self) -> Result<()> {
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        Ok(())
    }
}
