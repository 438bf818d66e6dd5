//! In-place block repaint for real-time rows.
//!
//! Positions relative to the cursor instead of absolute coordinates:
//! every repaint moves UP over the previously painted block and rewrites
//! it. Growing the block scrolls naturally; anchoring off the current
//! position (not a saved one) keeps the frame valid after a scroll.

use std::io::{Result, Write};

use crossterm::{
    QueueableCommand,
    cursor::{Hide, MoveDown, MoveToColumn, MoveUp, Show},
    terminal::{Clear, ClearType},
};

/// A contiguous block of terminal lines repainted in place.
#[derive(Debug)]
pub(crate) struct Frame<W: Write> {
    out: W,
    painted: u16,
    active: bool,
}

impl<W: Write> Frame<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            painted: 0,
            active: false,
        }
    }

    /// Claims the region and hides the cursor. Idempotent.
    pub(crate) fn open(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        self.out.queue(Hide)?;
        self.out.flush()?;
        self.active = true;
        Ok(())
    }

    /// Rewrites the whole block, growing or shrinking it to `lines`.
    pub(crate) fn draw(&mut self, lines: &[&str]) -> Result<()> {
        if !self.active {
            self.open()?;
        }

        // Back to the top of the previous block.
        if self.painted > 0 {
            self.out.queue(MoveUp(self.painted))?;
            self.out.queue(MoveToColumn(0))?;
        }

        for line in lines {
            self.out.queue(Clear(ClearType::UntilNewLine))?;
            write!(self.out, "{line}\r\n")?;
        }

        // Rows left over from a taller previous block are blanked and
        // the cursor parked just below the new block.
        let extra = self.painted.saturating_sub(lines.len() as u16);
        for i in 0..extra {
            self.out.queue(Clear(ClearType::CurrentLine))?;
            if i + 1 < extra {
                self.out.queue(MoveDown(1))?;
            }
        }
        if extra > 1 {
            self.out.queue(MoveUp(extra - 1))?;
        }

        self.painted = lines.len() as u16;
        self.out.flush()?;
        Ok(())
    }

    /// Releases the region, leaving the block in scrollback. Idempotent.
    pub(crate) fn close(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.out.queue(Show)?;
        self.out.queue(MoveToColumn(0))?;
        self.out.flush()?;
        self.active = false;
        Ok(())
    }
}
