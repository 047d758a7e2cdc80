//! Timeline module: conversation buffers and their line logs.
//!
//! This module contains:
//! - [`Line`]: one message with its cached layout
//! - [`Buffer`]: the line log and read state of one conversation
//! - [`BufferList`]: all buffers, the selection, and the painters for the
//!   buffer list and the selected timeline

mod buffer;
mod draw;
mod line;
mod list;

pub use buffer::{AppendResult, Buffer};
pub use line::Line;
pub use list::BufferList;

pub(crate) use draw::{print_ident, print_str};
pub(crate) use list::TIMELINE_GUTTER;
