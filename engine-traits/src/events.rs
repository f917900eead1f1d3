//! Events delivered by the engine on its own callback thread.
//!
//! The engine adapter forwards two independent callback streams to the core:
//! playback events ([`EngineEvent`]) and surface lifecycle notifications
//! ([`SurfaceLifecycleEvent`]). Both arrive on a thread owned by the engine,
//! distinct from caller threads and from the core's command worker, and are
//! handled synchronously on that thread.

use serde::{Deserialize, Serialize};

/// Playback event emitted by the native engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum EngineEvent {
    /// The engine started opening the prepared media.
    Opening,
    /// Playback is running.
    Playing,
    /// Playback is paused.
    Paused,
    /// Playback was stopped.
    Stopped,
    /// The end of the media was reached.
    EndReached,
    /// The playback position advanced.
    PositionChanged,
    /// The video layout changed.
    NewLayout {
        /// Full video width in pixels.
        width: u32,
        /// Full video height in pixels.
        height: u32,
        /// Visible video width in pixels.
        visible_width: u32,
        /// Visible video height in pixels.
        visible_height: u32,
        /// Pixel aspect ratio numerator.
        aspect_num: u32,
        /// Pixel aspect ratio denominator.
        aspect_den: u32,
    },
}

impl EngineEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            EngineEvent::Opening => "Opening media",
            EngineEvent::Playing => "Playback running",
            EngineEvent::Paused => "Playback paused",
            EngineEvent::Stopped => "Playback stopped",
            EngineEvent::EndReached => "End of media reached",
            EngineEvent::PositionChanged => "Position changed",
            EngineEvent::NewLayout { .. } => "Video layout changed",
        }
    }
}

/// Surface lifecycle notification emitted by the engine's video output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum SurfaceLifecycleEvent {
    /// The engine finished creating its rendering surfaces.
    SurfacesCreated,
    /// The engine tore down its rendering surfaces.
    SurfacesDestroyed,
    /// Hardware-accelerated rendering failed.
    HardwareAccelerationError,
}
