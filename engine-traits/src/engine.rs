//! Media Engine Abstraction
//!
//! The control contract between the playback core and a native
//! decoding/rendering engine.

use crate::error::Result;
use crate::events::{EngineEvent, SurfaceLifecycleEvent};
use crate::media::Media;
use crate::surface::SurfaceDescriptor;
use std::sync::Arc;
use std::time::Duration;

/// Receiver for callbacks the engine delivers on its own thread.
///
/// Implementations must tolerate being invoked off any particular thread and
/// must not assume exclusive access to anything they touch.
pub trait EngineEventHandler: Send + Sync {
    /// A playback event was emitted.
    fn on_event(&self, event: EngineEvent);

    /// A surface lifecycle notification was emitted.
    fn on_surface_event(&self, event: SurfaceLifecycleEvent) {
        let _ = event;
    }
}

/// Thin facade over one native engine session.
///
/// Exactly one session is alive for the lifetime of an adapter instance: it
/// is created when the adapter is constructed, destroyed by [`release`], and
/// never recreated. The playback core confines every mutating call to its
/// single command worker thread; [`duration`] and [`position`] are read-only
/// and may be called from any thread.
///
/// # Example
///
/// ```ignore
/// use engine_traits::{EngineError, Media, MediaEngine};
///
/// pub struct LibvlcEngine {
///     session: vlc::MediaPlayer,
/// }
///
/// impl MediaEngine for LibvlcEngine {
///     fn prepare(&self, media: &Media) -> engine_traits::Result<()> {
///         self.session
///             .load(media.location())
///             .map_err(|e| EngineError::OpenFailed(e.to_string()))
///     }
///     // ...
/// }
/// ```
///
/// [`release`]: MediaEngine::release
/// [`duration`]: MediaEngine::duration
/// [`position`]: MediaEngine::position
pub trait MediaEngine: Send + Sync {
    /// Register the receiver for engine callbacks.
    ///
    /// The core installs its event bridge exactly once, at construction.
    /// Installing a new handler replaces the previous one.
    fn set_event_handler(&self, handler: Arc<dyn EngineEventHandler>);

    /// Load the given media into the session.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OpenFailed`](crate::EngineError::OpenFailed)
    /// if the locator cannot be opened.
    fn prepare(&self, media: &Media) -> Result<()>;

    /// Start or resume playback of the prepared media.
    fn play(&self) -> Result<()>;

    /// Pause playback, keeping the session's position.
    fn pause(&self) -> Result<()>;

    /// Stop playback.
    fn stop(&self) -> Result<()>;

    /// Move the playback position.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoMediaLoaded`](crate::EngineError::NoMediaLoaded)
    /// if nothing has been prepared.
    fn seek(&self, position: Duration) -> Result<()>;

    /// Bind a drawable surface as the video output.
    ///
    /// Sets the engine's window size to the descriptor's dimensions, binds
    /// the handle, and attaches the engine's views to it.
    fn attach_surface(&self, descriptor: &SurfaceDescriptor) -> Result<()>;

    /// Detach the engine's views from the currently bound surface.
    fn detach_surface(&self) -> Result<()>;

    /// Destroy the native session. No mutating call may follow.
    fn release(&self) -> Result<()>;

    /// Total duration of the prepared media.
    fn duration(&self) -> Result<Duration>;

    /// Current playback position.
    fn position(&self) -> Result<Duration>;
}
