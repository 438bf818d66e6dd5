//! Error taxonomy.

use std::io;

use thiserror::Error as ThisError;

/// Failures surfaced by the progress subsystem.
///
/// Host pipeline errors never appear here: the interrupt hook borrows
/// them for logging and they stay with the caller, untouched.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The capability needed for live rendering is missing at
    /// construction time.
    #[error("live progress rendering requires {required}")]
    SurfaceUnavailable {
        /// What is required, including the minimum backend version.
        required: &'static str,
    },

    /// The surface failed while painting. Not retried, not masked;
    /// the renderer is stopped before this propagates.
    #[error("render surface failure: {0}")]
    Render(#[from] io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TerminalSurface;

    #[test]
    fn dependency_error_names_capability_and_version() {
        let err = match TerminalSurface::detect() {
            Err(err) => err,
            Ok(_) => Error::SurfaceUnavailable {
                required: crate::render::REQUIRED,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("interactive terminal"));
        assert!(msg.contains("crossterm >= 0.29"));
    }

    #[test]
    fn render_errors_carry_the_io_source() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert!(err.to_string().contains("gone"));
    }
}
