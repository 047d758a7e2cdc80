//! Crate error type.

use thiserror::Error;

/// Result alias for fallible terminal-facing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors of the terminal-facing layer.
///
/// Buffer and layout operations never fail; only talking to the terminal
/// does.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuring, querying or writing to the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    /// The input thread is gone and no more events will arrive.
    #[error("input event queue disconnected")]
    InputDisconnected,
}
