//! The injectable drawing boundary.

use std::fmt::Debug;
use std::io;

use crate::phase::Phase;
use crate::task::TaskId;

/// One composed row, ready to paint.
#[derive(Debug, Clone)]
pub struct Row {
    /// Task the row belongs to.
    pub task: TaskId,
    /// The task's phase, for surfaces that tally per flow.
    pub phase: Phase,
    /// Fully styled line content.
    pub line: String,
}

/// Where rows get painted.
///
/// The renderer drives exactly four operations through this trait;
/// substituting it is how headless hosts run and how tests observe
/// paint/reset/close behavior without a terminal.
pub trait RenderSurface: Debug {
    /// Prepares the surface (cursor setup, region claim).
    ///
    /// # Errors
    ///
    /// Returns an error if the backing device rejects the writes.
    fn open(&mut self) -> io::Result<()>;

    /// Paints the full visible row set, replacing the previous frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing device rejects the writes.
    fn paint(&mut self, rows: &[Row]) -> io::Result<()>;

    /// Clears one task's visual state while keeping its row.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing device rejects the writes.
    fn erase(&mut self, task: TaskId) -> io::Result<()>;

    /// Releases the surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing device rejects the writes.
    fn close(&mut self) -> io::Result<()>;
}

/// Surface that draws nothing. For headless hosts and disabled-display
/// environments where the caller still wants progress accounting.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn open(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn paint(&mut self, _rows: &[Row]) -> io::Result<()> {
        Ok(())
    }

    fn erase(&mut self, _task: TaskId) -> io::Result<()> {
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}
