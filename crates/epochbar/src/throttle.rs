//! Render gating by processed-unit count.

use crate::phase::Phase;

/// Decides when processed units justify a repaint.
///
/// One accumulator per phase; recording a unit reports "fire" when the
/// accumulator reaches the configured rate, and resets it. A rate of
/// zero makes the throttle inert: nothing records, nothing fires.
#[derive(Debug)]
pub struct RenderThrottle {
    rate: u32,
    pending: [u64; Phase::COUNT],
}

impl RenderThrottle {
    /// Builds a throttle firing every `rate` units per phase.
    pub fn new(rate: u32) -> Self {
        Self {
            rate,
            pending: [0; Phase::COUNT],
        }
    }

    /// Units between fires; zero means never.
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Records `n` processed units for `phase`. Returns `true` when the
    /// accumulator reached the rate, resetting it to zero.
    pub fn record(&mut self, phase: Phase, n: u64) -> bool {
        if self.rate == 0 {
            return false;
        }
        let slot = &mut self.pending[phase.index()];
        *slot = slot.saturating_add(n);
        if *slot >= u64::from(self.rate) {
            *slot = 0;
            true
        } else {
            false
        }
    }

    /// Units recorded for `phase` since its last fire.
    pub fn pending(&self, phase: Phase) -> u64 {
        self.pending[phase.index()]
    }

    /// Clears the accumulator for `phase`, returning what it held.
    pub fn flush(&mut self, phase: Phase) -> u64 {
        std::mem::take(&mut self.pending[phase.index()])
    }
}
