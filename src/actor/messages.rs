//! Events sent by the input thread.
//!
//! These mirror the subset of terminal events a chat client reacts to, so
//! consumers never depend on the terminal backend's types.

use bitflags::bitflags;

/// Key codes for keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key.
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Shift+Tab.
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
    pub struct KeyModifiers: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CONTROL = 0b0010;
        /// Alt/Option.
        const ALT = 0b0100;
        /// Super/Command.
        const SUPER = 0b1000;
    }
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button.
    Left,
    /// Right button.
    Right,
    /// Middle button.
    Middle,
}

/// Position and state of a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Button involved, `None` for plain moves.
    pub button: Option<MouseButton>,
    /// Modifiers held.
    pub modifiers: KeyModifiers,
}

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key.
        code: KeyCode,
        /// Modifiers held.
        modifiers: KeyModifiers,
    },

    /// Mouse button pressed.
    MouseDown(MouseEvent),

    /// Mouse button released.
    MouseUp(MouseEvent),

    /// Mouse moved, with or without a button held.
    MouseMove(MouseEvent),

    /// Wheel scrolled.
    MouseScroll {
        /// Column.
        x: u16,
        /// Row.
        y: u16,
        /// Positive when scrolling up, negative when scrolling down.
        delta: i16,
    },

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Terminal gained focus.
    FocusGained,

    /// Terminal lost focus.
    FocusLost,

    /// Bracketed paste.
    Paste(String),

    /// Reading the terminal failed.
    Error(String),

    /// The input thread stopped; no event follows.
    Shutdown,
}

impl InputEvent {
    /// A key press without modifiers.
    pub const fn key(code: KeyCode) -> Self {
        Self::Key {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    /// Whether this is a press of `code` with exactly `modifiers` held.
    pub fn is_key(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        matches!(self, Self::Key { code: c, modifiers: m } if *c == code && *m == modifiers)
    }
}
