//! Rendering: the surface boundary, the terminal engine, and the
//! lifecycle wrapper the controller drives.

mod frame;
pub(crate) mod renderer;
mod surface;
mod term;

pub use surface::{NullSurface, RenderSurface, Row};
pub use term::TerminalSurface;

#[cfg(test)]
pub(crate) use term::REQUIRED;
