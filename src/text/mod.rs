//! Text module: styled strings, display widths and the layout engine.
//!
//! This module contains:
//! - [`Style`], [`Rgb`], [`Modifiers`]: visual attributes of text
//! - [`StyledText`]: an immutable string with ordered style runs
//! - [`width`]: the display-width oracle every column computation uses
//! - [`wrap`]: split points and width-aware word wrap

mod style;
mod styled;
pub mod width;
pub mod wrap;

pub use style::{Modifiers, Rgb, Style};
pub use styled::{StyleRun, StyledChars, StyledText, StyledTextBuilder};
pub use width::{char_width, is_split_char, str_width, truncate};
pub use wrap::{split_points, wrap, SplitPoint};
