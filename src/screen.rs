//! Clear-screen capability
//!
//! Clearing is presentation only. Callers log and ignore failures.

use std::io::{self, IsTerminal, Write};

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

use crate::config::ClearMode;

pub trait ClearScreen {
    /// Clear the screen that `out` is attached to
    fn clear(&mut self, out: &mut dyn Write) -> io::Result<()>;

    fn name(&self) -> &'static str;
}

/// Emits the terminal's clear + home sequences through crossterm
#[derive(Debug, Default)]
pub struct TerminalClearer;

impl ClearScreen for TerminalClearer {
    fn clear(&mut self, out: &mut dyn Write) -> io::Result<()> {
        out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        out.flush()
    }

    fn name(&self) -> &'static str {
        "terminal"
    }
}

/// Leaves the screen untouched; used for pipes, tests and `--no-clear`
#[derive(Debug, Default)]
pub struct NoopClearer;

impl ClearScreen for NoopClearer {
    fn clear(&mut self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

/// Pick a clearer for the given mode and whether stdout is a terminal
pub fn select_clearer(mode: ClearMode, stdout_is_terminal: bool) -> Box<dyn ClearScreen> {
    match mode {
        ClearMode::Always => Box::new(TerminalClearer),
        ClearMode::Auto if stdout_is_terminal => Box::new(TerminalClearer),
        ClearMode::Auto | ClearMode::Never => Box::new(NoopClearer),
    }
}

/// Convenience for the binary: resolve `mode` against the real stdout
pub fn clearer_for_stdout(mode: ClearMode) -> Box<dyn ClearScreen> {
    select_clearer(mode, io::stdout().is_terminal())
}
