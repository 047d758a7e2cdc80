//! Input actor: a dedicated thread polling terminal events.
//!
//! The thread forwards converted events into a bounded queue and re-checks
//! the shared exit flag at least once per poll timeout. When the flag is
//! raised it sends [`InputEvent::Shutdown`] and stops, so a consumer blocked
//! on the queue always wakes up.

use super::messages::{InputEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent};
use crate::error::Result;
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to the input thread.
#[derive(Debug)]
pub struct InputActor {
    handle: Option<JoinHandle<()>>,
    exit: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input thread.
    ///
    /// `exit` is shared with the consumer: raising it (with release
    /// ordering) stops the thread within `poll_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(sender: Sender<InputEvent>, exit: Arc<AtomicBool>, poll_timeout: Duration) -> Result<Self> {
        let flag = Arc::clone(&exit);
        let handle = thread::Builder::new()
            .name("threadline-input".to_string())
            .spawn(move || run_loop(&sender, &flag, poll_timeout))?;

        Ok(Self {
            handle: Some(handle),
            exit,
        })
    }

    /// Ask the thread to stop.
    pub fn shutdown(&self) {
        self.exit.store(true, Ordering::Release);
    }

    /// Stop the thread and wait for it.
    ///
    /// The queue's receiver must be drained or dropped, or the final
    /// [`InputEvent::Shutdown`] may block the thread forever.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop(sender: &Sender<InputEvent>, exit: &AtomicBool, poll_timeout: Duration) {
    tracing::trace!(target: "input", "input_thread_started");

    while !exit.load(Ordering::Acquire) {
        let event = match event::poll(poll_timeout) {
            Ok(true) => match event::read() {
                Ok(event) => convert_event(event),
                Err(e) => {
                    tracing::warn!(target: "input", error = %e, "input_read_failed");
                    Some(InputEvent::Error(e.to_string()))
                }
            },
            Ok(false) => None,
            Err(e) => {
                tracing::warn!(target: "input", error = %e, "input_poll_failed");
                Some(InputEvent::Error(e.to_string()))
            }
        };

        if let Some(event) = event {
            if sender.send(event).is_err() {
                tracing::trace!(target: "input", "input_receiver_dropped");
                return;
            }
        }
    }

    let _ = sender.send(InputEvent::Shutdown);
    tracing::trace!(target: "input", "input_thread_stopped");
}

/// Convert a terminal event. Events the crate does not model map to `None`.
pub(crate) fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            Some(InputEvent::Key {
                code: convert_key_code(key.code)?,
                modifiers: convert_modifiers(key.modifiers),
            })
        }
        Event::Mouse(mouse) => convert_mouse_event(mouse),
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        Event::FocusGained => Some(InputEvent::FocusGained),
        Event::FocusLost => Some(InputEvent::FocusLost),
        Event::Paste(text) => Some(InputEvent::Paste(text)),
    }
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::BackTab => KeyCode::BackTab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Insert => KeyCode::Insert,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    out.set(KeyModifiers::SHIFT, mods.contains(event::KeyModifiers::SHIFT));
    out.set(KeyModifiers::CONTROL, mods.contains(event::KeyModifiers::CONTROL));
    out.set(KeyModifiers::ALT, mods.contains(event::KeyModifiers::ALT));
    out.set(KeyModifiers::SUPER, mods.contains(event::KeyModifiers::SUPER));
    out
}

fn convert_mouse_event(mouse: event::MouseEvent) -> Option<InputEvent> {
    let at = |button| MouseEvent {
        x: mouse.column,
        y: mouse.row,
        button,
        modifiers: convert_modifiers(mouse.modifiers),
    };
    let scroll = |delta| InputEvent::MouseScroll {
        x: mouse.column,
        y: mouse.row,
        delta,
    };

    match mouse.kind {
        event::MouseEventKind::Down(b) => Some(InputEvent::MouseDown(at(Some(convert_mouse_button(b))))),
        event::MouseEventKind::Up(b) => Some(InputEvent::MouseUp(at(Some(convert_mouse_button(b))))),
        event::MouseEventKind::Drag(b) => Some(InputEvent::MouseMove(at(Some(convert_mouse_button(b))))),
        event::MouseEventKind::Moved => Some(InputEvent::MouseMove(at(None))),
        event::MouseEventKind::ScrollUp => Some(scroll(1)),
        event::MouseEventKind::ScrollDown => Some(scroll(-1)),
        _ => None,
    }
}

const fn convert_mouse_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}
