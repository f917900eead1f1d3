//! # Engine Adapter Traits
//!
//! Abstraction of the native media engine consumed by the playback core.
//!
//! ## Overview
//!
//! This crate defines the contract between the playback control core and a
//! platform's native decoding/rendering engine. The engine is treated as
//! opaque: it decodes media, renders frames into a bound surface, and
//! reports progress through callbacks. Everything else (command
//! serialization, state tracking, surface binding) lives in `core-player`.
//!
//! ## Traits
//!
//! - [`MediaEngine`](engine::MediaEngine) - control facade over one native
//!   engine session (prepare, play, pause, stop, seek, surface binding,
//!   release, duration/position queries)
//! - [`EngineEventHandler`](engine::EngineEventHandler) - receiver for the
//!   engine's playback and surface lifecycle callbacks
//!
//! ## Threading Model
//!
//! All traits require `Send + Sync`. The playback core calls every mutating
//! [`MediaEngine`](engine::MediaEngine) method from one dedicated worker
//! thread; queries may arrive from any caller thread. Callbacks are
//! delivered on a thread owned by the engine and handled synchronously
//! there.
//!
//! ## Error Handling
//!
//! All fallible operations use [`EngineError`]. Adapters should convert
//! native error codes into the closest variant and include enough context
//! to make swallowed-and-logged failures diagnosable.

pub mod engine;
pub mod error;
pub mod events;
pub mod media;
pub mod surface;

pub use error::{EngineError, Result};

// Re-export commonly used types
pub use engine::{EngineEventHandler, MediaEngine};
pub use events::{EngineEvent, SurfaceLifecycleEvent};
pub use media::Media;
pub use surface::{SurfaceDescriptor, SurfaceHandle};
