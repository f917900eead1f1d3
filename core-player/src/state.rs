//! # Playback State
//!
//! The five-state playback state machine and the shared cell it lives in.
//!
//! The state is written only by the engine-event translation step (on the
//! engine's callback thread) and read from any thread. The cell wraps an
//! atomic so readers never observe a torn or stale-before-init value; the
//! initial value is always [`PlaybackState::Idle`].
//!
//! Transitions are driven purely by engine events; no transition is
//! validated against caller intent. A `seek_to` submitted after `release`
//! is not rejected here; it is dropped by the command worker instead.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// Playback state as reported by the most recently processed engine event.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Initial state; also re-entered when the engine starts opening media.
    Idle = 0,
    /// Playback is running.
    Playing = 1,
    /// Playback is paused.
    Paused = 2,
    /// Playback was stopped.
    Stopped = 3,
    /// The end of the media was reached.
    Ended = 4,
}

impl PlaybackState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => PlaybackState::Idle,
            1 => PlaybackState::Playing,
            2 => PlaybackState::Paused,
            3 => PlaybackState::Stopped,
            4 => PlaybackState::Ended,
            // The cell below is the only writer and stores enum tags only.
            other => unreachable!("invalid playback state tag: {other}"),
        }
    }

    /// Returns a human-readable description of the state.
    pub fn description(&self) -> &str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stopped => "stopped",
            PlaybackState::Ended => "ended",
        }
    }
}

/// Shared playback-state cell with atomic load/store semantics.
#[derive(Debug)]
pub(crate) struct PlaybackStateCell(AtomicU8);

impl PlaybackStateCell {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(PlaybackState::Idle as u8))
    }

    /// The latest published state.
    pub(crate) fn load(&self) -> PlaybackState {
        PlaybackState::from_raw(self.0.load(Ordering::Acquire))
    }

    /// Publish a new state.
    pub(crate) fn store(&self, state: PlaybackState) {
        self.0.store(state as u8, Ordering::Release);
    }
}
