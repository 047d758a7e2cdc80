//! Input actor and its event protocol.
//!
//! ```text
//! ┌──────────────┐   InputEvent (bounded)   ┌──────────────┐
//! │ Input Thread │ ───────────────────────▶ │  Event Loop  │
//! └──────────────┘                          └──────────────┘
//!        ▲                                         │
//!        └──────────── exit flag ◀─────────────────┘
//! ```

mod input;
mod messages;

pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent};
