//! Lifecycle wrapper over a render surface.

use std::io;

use tracing::debug;

use crate::columns::{Column, compose_row};
use crate::task::{ProgressTask, TaskId};
use crate::theme::Theme;

use super::surface::{RenderSurface, Row};

/// Owns the surface and its open/closed lifecycle.
///
/// `start` and `stop` are idempotent; dropping stops. A surface that was
/// never started is never closed, so the externally observable close
/// happens at most once.
#[derive(Debug)]
pub(crate) struct Renderer {
    surface: Box<dyn RenderSurface>,
    started: bool,
    stopped: bool,
}

impl Renderer {
    pub(crate) fn new(surface: Box<dyn RenderSurface>) -> Self {
        Self {
            surface,
            started: false,
            stopped: false,
        }
    }

    /// Opens the surface once; later calls are no-ops.
    pub(crate) fn start(&mut self) -> io::Result<()> {
        if self.started {
            return Ok(());
        }
        self.surface.open()?;
        self.started = true;
        Ok(())
    }

    /// Composes and paints one row per visible task.
    pub(crate) fn update(
        &mut self,
        tasks: &[&ProgressTask],
        columns: &[Column],
        theme: &Theme,
    ) -> io::Result<()> {
        let rows: Vec<Row> = tasks
            .iter()
            .map(|task| Row {
                task: task.id(),
                phase: task.phase(),
                line: compose_row(task, columns, theme),
            })
            .collect();
        self.surface.paint(&rows)
    }

    /// Mirrors an in-place task reset to the surface.
    pub(crate) fn reset(&mut self, task: TaskId) -> io::Result<()> {
        self.surface.erase(task)
    }

    /// Closes the surface at most once; safe when never started.
    pub(crate) fn stop(&mut self) -> io::Result<()> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;
        if !self.started {
            return Ok(());
        }
        self.surface.close()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if self.stop().is_err() {
            debug!("render surface close failed during drop");
        }
    }
}
