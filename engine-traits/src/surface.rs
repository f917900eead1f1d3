//! Drawable surface types exchanged between the core and the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a native drawable surface.
///
/// The raw value is whatever the host windowing layer uses to identify the
/// drawable (a pointer, a texture id, a window id). The core only moves it
/// around; the engine adapter interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    /// Wrap a raw native handle value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw native handle value.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// A drawable target ready to be bound to the engine.
///
/// Produced by a rendering sink once its surface exists, and consumed on the
/// command worker when an attach executes: the engine's window size is set
/// to `width` x `height` and `handle` is bound as the video output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    /// Native handle of the drawable.
    pub handle: SurfaceHandle,
    /// Drawable width in pixels.
    pub width: u32,
    /// Drawable height in pixels.
    pub height: u32,
}

impl SurfaceDescriptor {
    /// Create a descriptor for a drawable of the given size.
    pub fn new(handle: SurfaceHandle, width: u32, height: u32) -> Self {
        Self {
            handle,
            width,
            height,
        }
    }
}
