//! # Player Error Types
//!
//! Error taxonomy for the playback control core.
//!
//! Control operations (`prepare`, `play`, `seek_to`, ...) never surface
//! errors to callers: failures raised while the command worker executes a
//! drained command are logged and discarded, and the worker moves on to the
//! next command. [`PlayerError`] therefore only appears on the synchronous
//! edges of the API: construction, configuration, logging setup, and the
//! read-only queries.

use engine_traits::EngineError;
use thiserror::Error;

/// Errors surfaced by the synchronous edges of the player API.
#[derive(Error, Debug)]
pub enum PlayerError {
    /// An engine adapter call failed.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// The supplied configuration failed validation.
    #[error("Invalid player configuration: {0}")]
    InvalidConfig(String),

    /// The command worker thread could not be started.
    #[error("Failed to start command worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),

    /// The logging infrastructure could not be initialized.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),
}

impl PlayerError {
    /// Returns `true` if the underlying engine session has been released,
    /// meaning no further query can succeed on this instance.
    pub fn is_session_released(&self) -> bool {
        matches!(self, PlayerError::Engine(e) if e.is_released())
    }
}

/// Result type for player operations.
pub type Result<T> = std::result::Result<T, PlayerError>;
