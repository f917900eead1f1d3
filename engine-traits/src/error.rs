use thiserror::Error;

/// Errors raised by a native engine adapter.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine could not open or parse the submitted media.
    #[error("Failed to open media: {0}")]
    OpenFailed(String),

    /// A control operation (play, pause, stop, seek) failed inside the engine.
    #[error("Engine operation failed: {0}")]
    OperationFailed(String),

    /// A control or query operation requires media, but none has been prepared.
    #[error("No media loaded")]
    NoMediaLoaded,

    /// The engine refused to bind the offered drawable surface.
    #[error("Engine rejected surface: {0}")]
    SurfaceRejected(String),

    /// The native session has already been released.
    #[error("Engine session already released")]
    SessionReleased,
}

impl EngineError {
    /// Returns `true` if the underlying native session is gone and no
    /// further calls can succeed.
    pub fn is_released(&self) -> bool {
        matches!(self, EngineError::SessionReleased)
    }

    /// Returns `true` if the error concerns the submitted media rather
    /// than the engine session itself.
    pub fn is_media_error(&self) -> bool {
        matches!(
            self,
            EngineError::OpenFailed(_) | EngineError::NoMediaLoaded
        )
    }
}

/// Result type for engine adapter operations.
pub type Result<T> = std::result::Result<T, EngineError>;
