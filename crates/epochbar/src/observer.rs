//! Host-facing observer seam.

use std::error::Error as StdError;

use crate::error::Result;
use crate::phase::Phase;

/// Progress hooks a pipeline host drives.
///
/// A plain trait rather than an inheritable lifecycle base: hosts call
/// these four methods inline from their processing loop and depend on
/// the trait, not on a concrete bar. [`EpochBar`](crate::EpochBar) is
/// the standard implementation; headless hosts can bring their own.
pub trait PipelineObserver {
    /// A phase is beginning. `total` is the source's unit count when
    /// finite (`None` for unbounded sources); `epoch` indexes the
    /// enclosing epoch, zero outside epoch loops.
    ///
    /// # Errors
    ///
    /// Returns an error if the observer cannot update its display.
    fn on_phase_start(&mut self, phase: Phase, total: Option<u64>, epoch: u64) -> Result<()>;

    /// One unit of the phase finished processing.
    ///
    /// # Errors
    ///
    /// Returns an error if the observer cannot update its display.
    fn on_unit_processed(&mut self, phase: Phase) -> Result<()>;

    /// The phase completed normally.
    ///
    /// # Errors
    ///
    /// Returns an error if the observer cannot update its display.
    fn on_phase_end(&mut self, phase: Phase) -> Result<()>;

    /// The host is aborting on `error`. Implementations release any
    /// live terminal state; the error stays with the caller and must
    /// propagate unchanged.
    fn on_interrupt(&mut self, error: &(dyn StdError + 'static));
}
