//! # Listener Registry
//!
//! Capability traits for playback observers and the thread-safe sets they
//! are registered in.
//!
//! ## Dispatch Model
//!
//! Listeners are invoked synchronously on whatever thread the engine
//! delivers its events: implementations must tolerate being called off any
//! particular thread and must not assume exclusive access to shared data.
//! Dispatch iterates a snapshot of the membership taken at fire time, so a
//! listener may add or remove listeners (including itself) mid-dispatch
//! without breaking the iteration. No ordering among listeners of one set
//! is guaranteed.
//!
//! ## Identity
//!
//! Membership is keyed on `Arc` identity: re-adding a clone of an `Arc`
//! that is already registered is a no-op, and removal requires a clone of
//! the originally registered `Arc`.

use crate::state::PlaybackState;
use parking_lot::RwLock;
use std::sync::Arc;

/// Observer of video output characteristics.
pub trait VideoListener: Send + Sync {
    /// The engine reported a new video layout.
    ///
    /// Fired once per layout change, with no de-duplication against the
    /// previously reported size.
    fn on_video_size_changed(&self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// The first frame of the current media was rendered.
    ///
    /// Fired at most once per idle cycle.
    fn on_rendered_first_frame(&self) {}
}

/// Observer of playback state changes.
pub trait PlayerStateListener: Send + Sync {
    /// Fired after every processed engine event with the current (possibly
    /// unchanged) state.
    fn on_player_state_changed(&self, state: PlaybackState);
}

/// Observer of playback completion.
pub trait CompletionListener: Send + Sync {
    /// The current media played to its end.
    ///
    /// Fired exactly once per end-reached event; never retroactively for
    /// events that occurred before the listener was registered.
    fn on_complete(&self);
}

/// A set of listener capabilities with snapshot-based dispatch.
///
/// Add/remove/clear are safe to call from any thread, concurrently with
/// dispatch. Membership is idempotent by `Arc` identity.
pub struct ListenerSet<T: ?Sized> {
    entries: RwLock<Vec<Arc<T>>>,
}

impl<T: ?Sized> ListenerSet<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Register a listener. Returns `false` if it was already present.
    pub fn add(&self, listener: Arc<T>) -> bool {
        let mut entries = self.entries.write();
        if entries.iter().any(|e| Arc::ptr_eq(e, &listener)) {
            return false;
        }
        entries.push(listener);
        true
    }

    /// Unregister a listener. Returns `false` if it was not present.
    pub fn remove(&self, listener: &Arc<T>) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|e| !Arc::ptr_eq(e, listener));
        entries.len() != before
    }

    /// Unregister every listener.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// The current membership, for dispatch.
    ///
    /// The snapshot is detached from the set: mutations performed while the
    /// caller iterates it affect only future dispatches.
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.entries.read().clone()
    }
}

impl<T: ?Sized> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
