//! # Playback Control Core
//!
//! Asynchronous, non-blocking control layer over a native media engine.
//!
//! ## Overview
//!
//! This crate mediates between arbitrary caller threads and a single
//! native decoding engine (abstracted by `engine-traits`):
//!
//! - **Command worker** - every engine-mutating operation is enqueued into
//!   an unbounded FIFO mailbox and executed by one dedicated thread, so
//!   commands never run concurrently and always run in submission order.
//! - **State machine** - a five-state playback state mutated only by
//!   engine-event translation, readable from any thread.
//! - **Surface binding** - tracks the rendering sink, defers attach until
//!   the sink's drawable is usable, and detaches safely.
//! - **Listener registry** - thread-safe capability sets for video,
//!   player-state, and completion observers, dispatched on the engine's
//!   callback thread from a snapshot of the membership.
//!
//! The control API is failure-opaque: commands that fail inside the engine
//! are logged and discarded, and the worker continues with the next one.
//! Observers learn about effective state exclusively through listeners and
//! queries.
//!
//! ## Example
//!
//! ```ignore
//! use core_player::{PlayerConfig, VideoPlayer};
//! use engine_traits::Media;
//! use std::sync::Arc;
//!
//! let player = VideoPlayer::with_config(engine, PlayerConfig::default())?;
//! player.prepare(Media::from_path("/videos/intro.mp4"));
//! player.play();
//! ```

pub mod config;
pub mod error;
pub mod listener;
pub mod logging;
pub mod player;
pub mod state;
pub mod surface;

mod command;

pub use error::{PlayerError, Result};

// Re-export commonly used types
pub use config::PlayerConfig;
pub use listener::{CompletionListener, ListenerSet, PlayerStateListener, VideoListener};
pub use player::VideoPlayer;
pub use state::PlaybackState;
pub use surface::{HolderSink, ReadinessCallback, SurfaceSink, TextureSink};
