//! Crossterm-backed surface painting the live region on stdout.

use std::io::{self, Stdout, stdout};

use crossterm::tty::IsTty;

use crate::error::Error;
use crate::task::TaskId;

use super::frame::Frame;
use super::surface::{RenderSurface, Row};

/// Capability named in the construction-time dependency error.
pub(crate) const REQUIRED: &str = "an interactive terminal with ANSI cursor control (crossterm >= 0.29)";

/// The real terminal surface.
#[derive(Debug)]
pub struct TerminalSurface {
    frame: Frame<Stdout>,
}

impl TerminalSurface {
    /// Probes stdout and builds the surface.
    ///
    /// # Errors
    ///
    /// [`Error::SurfaceUnavailable`] when stdout is not an interactive
    /// terminal, so piped and captured runs fail fast instead of
    /// spraying control sequences into their output.
    pub fn detect() -> Result<Self, Error> {
        let out = stdout();
        if !out.is_tty() {
            return Err(Error::SurfaceUnavailable { required: REQUIRED });
        }
        Ok(Self {
            frame: Frame::new(out),
        })
    }
}

impl RenderSurface for TerminalSurface {
    fn open(&mut self) -> io::Result<()> {
        self.frame.open()
    }

    fn paint(&mut self, rows: &[Row]) -> io::Result<()> {
        let lines: Vec<&str> = rows.iter().map(|r| r.line.as_str()).collect();
        self.frame.draw(&lines)
    }

    // The zeroed row repaints on the next frame; nothing to erase
    // eagerly.
    fn erase(&mut self, _task: TaskId) -> io::Result<()> {
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.frame.close()
    }
}
