//! # Threadline
//!
//! Buffer-list state and width-aware line layout for terminal chat clients.
//!
//! Threadline keeps the conversations of a chat client (server buffers,
//! channels, queries) in display order, tracks what the user has read, and
//! wraps styled message bodies to the terminal width so the timeline can be
//! painted bottom-up and scrolled by rows.
//!
//! ## Core Concepts
//!
//! - **Split points**: word/blank boundaries computed once per line
//! - **Row breaks**: greedy word wrap over split points, cached per width
//! - **Mergeable lines**: join/part noise folds into one log entry
//! - **Backfill**: history is spliced before the oldest line without
//!   duplicating what is already there
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use threadline::{BufferList, Line, StyledText};
//!
//! let mut buffers = BufferList::new(80, 24, 16);
//! buffers.add("libera", "#rust");
//! buffers.add_line("libera", "#rust", Line::new(Utc::now(), "ferris", StyledText::plain("hi")));
//!
//! assert_eq!(buffers.current(), ("libera", "#rust"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod error;
pub mod grid;
pub mod terminal;
pub mod text;
pub mod timeline;
pub mod ui;

pub use actor::{InputActor, InputEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent};
pub use error::{Error, Result};
pub use grid::{Canvas, Cell, Grid};
pub use terminal::{OutputBuffer, Screen};
pub use text::{Modifiers, Rgb, SplitPoint, Style, StyledText, StyledTextBuilder};
pub use timeline::{AppendResult, Buffer, BufferList, Line};
pub use ui::{InputArea, Ui, UiConfig};
