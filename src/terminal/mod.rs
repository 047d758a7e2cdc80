//! Terminal module: escape-sequence output and the screen.
//!
//! - [`OutputBuffer`]: accumulates a frame's escape sequences for one write
//! - [`Screen`]: double-buffered [`Canvas`](crate::grid::Canvas) over a real
//!   terminal

mod output;
mod screen;

pub use output::OutputBuffer;
pub use screen::Screen;
