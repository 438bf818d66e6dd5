//! Live terminal progress for phase-structured batch pipelines.
//!
//! A pipeline run moves through phases (sanity-check, train, validate,
//! test, predict) and [`EpochBar`] shows one live row per active phase,
//! with repaints throttled by processed-unit count. However the run
//! ends, the terminal is released exactly once. Everything is
//! synchronous and single-threaded: renders happen inline on the
//! calling thread.
//!
//! Hosts drive the [`PipelineObserver`] hooks from their loop:
//!
//! ```
//! use epochbar::{BarConfig, EpochBar, NullSurface, Phase, PipelineObserver};
//!
//! let config = BarConfig::new().refresh_rate(2);
//! // `EpochBar::new(config)` attaches to the terminal; tests and
//! // headless hosts inject a surface instead.
//! let mut bar = EpochBar::with_surface(config, Box::new(NullSurface));
//!
//! bar.on_phase_start(Phase::Train, Some(10), 0)?;
//! for _ in 0..10 {
//!     bar.on_unit_processed(Phase::Train)?;
//! }
//! bar.on_phase_end(Phase::Train)?;
//! # Ok::<(), epochbar::Error>(())
//! ```

pub mod columns;
pub mod config;
pub mod controller;
pub mod error;
pub mod observer;
pub mod phase;
mod registry;
pub mod render;
pub mod task;
pub mod theme;
pub mod throttle;

pub use columns::{Column, default_columns};
pub use config::BarConfig;
pub use controller::EpochBar;
pub use error::{Error, Result};
pub use observer::PipelineObserver;
pub use phase::Phase;
pub use render::{NullSurface, RenderSurface, Row, TerminalSurface};
pub use task::{ProgressTask, TaskId};
pub use theme::Theme;
pub use throttle::RenderThrottle;
