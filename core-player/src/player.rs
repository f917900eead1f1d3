//! # Video Player Facade
//!
//! The public control surface over one native engine session.
//!
//! ## Overview
//!
//! A [`VideoPlayer`] owns three cooperating pieces:
//!
//! - the command worker (one dedicated thread serializing every
//!   engine-mutating operation),
//! - the playback state machine (mutated only by engine-event
//!   translation),
//! - the surface binding protocol (tracking the rendering sink and
//!   routing attach/detach through the worker).
//!
//! Every control operation is a fire-and-forget send into the worker's
//! mailbox: it is callable from any thread, never blocks, and cannot fail
//! from the caller's point of view. Observers learn what actually happened
//! through listener callbacks and the state/position queries.
//!
//! ## Threads
//!
//! ```text
//! caller threads ──submit──> command worker ──calls──> engine
//! engine thread  ──events──> state machine + listener dispatch
//! ```
//!
//! Engine events are translated synchronously on the engine's own callback
//! thread; listeners run there too.

use crate::command::{spawn_command_worker, Command, CommandSender};
use crate::config::PlayerConfig;
use crate::error::{PlayerError, Result};
use crate::listener::{CompletionListener, ListenerSet, PlayerStateListener, VideoListener};
use crate::state::{PlaybackState, PlaybackStateCell};
use crate::surface::{SurfaceBinding, SurfaceSink};
use engine_traits::{
    EngineEvent, EngineEventHandler, Media, MediaEngine, SurfaceLifecycleEvent,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, trace};

/// State shared between the facade and the engine's callback thread.
struct PlayerShared {
    state: PlaybackStateCell,
    first_frame_rendered: AtomicBool,
    video_listeners: ListenerSet<dyn VideoListener>,
    state_listeners: ListenerSet<dyn PlayerStateListener>,
    completion_listeners: ListenerSet<dyn CompletionListener>,
}

impl PlayerShared {
    fn new() -> Self {
        Self {
            state: PlaybackStateCell::new(),
            first_frame_rendered: AtomicBool::new(false),
            video_listeners: ListenerSet::new(),
            state_listeners: ListenerSet::new(),
            completion_listeners: ListenerSet::new(),
        }
    }

    /// Translate one engine event: update the state machine, run the
    /// event's side effects, then notify state listeners with the current
    /// (possibly unchanged) state.
    fn handle_event(&self, event: EngineEvent) {
        trace!(event = event.description(), "engine event");

        match event {
            EngineEvent::Opening => {
                self.state.store(PlaybackState::Idle);
                self.first_frame_rendered.store(false, Ordering::Release);
            }
            EngineEvent::Playing => self.state.store(PlaybackState::Playing),
            EngineEvent::Paused => self.state.store(PlaybackState::Paused),
            EngineEvent::Stopped => self.state.store(PlaybackState::Stopped),
            EngineEvent::EndReached => {
                self.state.store(PlaybackState::Ended);
                for listener in self.completion_listeners.snapshot() {
                    listener.on_complete();
                }
            }
            EngineEvent::PositionChanged => {
                // The flag is set before the notification goes out, and the
                // swap makes the first-frame dispatch happen at most once
                // per idle cycle even if the engine delivers concurrently.
                if !self.first_frame_rendered.swap(true, Ordering::AcqRel) {
                    for listener in self.video_listeners.snapshot() {
                        listener.on_rendered_first_frame();
                    }
                }
            }
            EngineEvent::NewLayout { width, height, .. } => {
                for listener in self.video_listeners.snapshot() {
                    listener.on_video_size_changed(width, height);
                }
            }
        }

        let state = self.state.load();
        for listener in self.state_listeners.snapshot() {
            listener.on_player_state_changed(state);
        }
    }
}

/// Engine callback receiver installed at construction.
struct EventBridge {
    shared: Arc<PlayerShared>,
}

impl EngineEventHandler for EventBridge {
    fn on_event(&self, event: EngineEvent) {
        self.shared.handle_event(event);
    }

    fn on_surface_event(&self, event: SurfaceLifecycleEvent) {
        trace!(?event, "engine surface event");
    }
}

/// Asynchronous, non-blocking playback controller over one engine session.
///
/// # Example
///
/// ```ignore
/// use core_player::VideoPlayer;
/// use engine_traits::Media;
/// use std::sync::Arc;
///
/// let player = VideoPlayer::new(engine)?;
/// player.prepare(Media::from_path("/videos/intro.mp4"));
/// player.play();
/// // ... caller returns immediately; state arrives via listeners.
/// ```
pub struct VideoPlayer {
    engine: Arc<dyn MediaEngine>,
    commands: Option<CommandSender>,
    shared: Arc<PlayerShared>,
    binding: Arc<SurfaceBinding>,
    discard_pending: Arc<AtomicBool>,
    drain_on_close: bool,
    worker: Option<JoinHandle<()>>,
}

impl VideoPlayer {
    /// Create a player over the given engine session with defaults.
    pub fn new(engine: Arc<dyn MediaEngine>) -> Result<Self> {
        Self::with_config(engine, PlayerConfig::default())
    }

    /// Create a player over the given engine session.
    ///
    /// Installs the event bridge on the engine and starts the command
    /// worker thread. Exactly one engine session backs the player for its
    /// whole lifetime; it is destroyed by [`release`](Self::release) and
    /// never recreated.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::InvalidConfig`] if `config` fails validation
    /// and [`PlayerError::WorkerSpawn`] if the worker thread cannot start.
    pub fn with_config(engine: Arc<dyn MediaEngine>, config: PlayerConfig) -> Result<Self> {
        config.validate().map_err(PlayerError::InvalidConfig)?;

        let shared = Arc::new(PlayerShared::new());
        let binding = Arc::new(SurfaceBinding::new());
        let discard_pending = Arc::new(AtomicBool::new(false));

        engine.set_event_handler(Arc::new(EventBridge {
            shared: Arc::clone(&shared),
        }));

        let (tx, rx) = mpsc::unbounded_channel();
        let worker = spawn_command_worker(
            &config.command_thread_name,
            Arc::clone(&engine),
            Arc::clone(&binding),
            rx,
            Arc::clone(&discard_pending),
        )?;

        debug!(
            thread = %config.command_thread_name,
            "video player created"
        );

        Ok(Self {
            engine,
            commands: Some(CommandSender::new(tx)),
            shared,
            binding,
            discard_pending,
            drain_on_close: config.drain_on_close,
            worker: Some(worker),
        })
    }

    fn submit(&self, command: Command) {
        if let Some(commands) = &self.commands {
            commands.submit(command);
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle controls (fire-and-forget)
    // ------------------------------------------------------------------

    /// Load the given media into the engine session.
    pub fn prepare(&self, media: Media) {
        self.submit(Command::Prepare(media));
    }

    /// Start or resume playback.
    pub fn play(&self) {
        self.submit(Command::Play);
    }

    /// Pause playback.
    pub fn pause(&self) {
        self.submit(Command::Pause);
    }

    /// Replay the most recently prepared media from the start.
    pub fn repeat(&self) {
        self.submit(Command::Repeat);
    }

    /// Stop playback.
    pub fn stop(&self) {
        self.submit(Command::Stop);
    }

    /// Destroy the engine session.
    ///
    /// Commands drained after this one are dropped without reaching the
    /// engine. A command racing into the mailbox from another thread may
    /// land on either side of the release; whichever side it lands on, it
    /// never observes a half-released engine and never raises to its
    /// caller.
    pub fn release(&self) {
        self.submit(Command::Release);
    }

    /// Move the playback position.
    ///
    /// Rapid seeks queue up individually; there is no coalescing.
    pub fn seek_to(&self, position: Duration) {
        self.submit(Command::SeekTo(position));
    }

    // ------------------------------------------------------------------
    // Listener management
    // ------------------------------------------------------------------

    pub fn add_video_listener(&self, listener: Arc<dyn VideoListener>) {
        self.shared.video_listeners.add(listener);
    }

    pub fn remove_video_listener(&self, listener: &Arc<dyn VideoListener>) {
        self.shared.video_listeners.remove(listener);
    }

    pub fn clear_video_listeners(&self) {
        self.shared.video_listeners.clear();
    }

    pub fn add_state_listener(&self, listener: Arc<dyn PlayerStateListener>) {
        self.shared.state_listeners.add(listener);
    }

    pub fn remove_state_listener(&self, listener: &Arc<dyn PlayerStateListener>) {
        self.shared.state_listeners.remove(listener);
    }

    pub fn clear_state_listeners(&self) {
        self.shared.state_listeners.clear();
    }

    pub fn add_completion_listener(&self, listener: Arc<dyn CompletionListener>) {
        self.shared.completion_listeners.add(listener);
    }

    pub fn remove_completion_listener(&self, listener: &Arc<dyn CompletionListener>) {
        self.shared.completion_listeners.remove(listener);
    }

    pub fn clear_completion_listeners(&self) {
        self.shared.completion_listeners.clear();
    }

    // ------------------------------------------------------------------
    // Surface binding
    // ------------------------------------------------------------------

    /// Bind a rendering sink as the video target.
    ///
    /// If the sink's drawable is already usable the attach is queued
    /// immediately; otherwise it is deferred until the sink reports
    /// readiness. Binding the already-bound sink is a no-op.
    pub fn set_video_sink(&self, sink: Arc<dyn SurfaceSink>) {
        if let Some(commands) = &self.commands {
            self.binding.set_sink(sink, commands);
        }
    }

    /// Unbind a rendering sink.
    ///
    /// A sink that is no longer the bound one is ignored, so a stale caller
    /// racing a replacement cannot detach the new sink's surface.
    pub fn clear_video_sink(&self, sink: &Arc<dyn SurfaceSink>) {
        if let Some(commands) = &self.commands {
            self.binding.clear_sink(sink, commands);
        }
    }

    /// Whether the engine's views are currently attached to a drawable.
    pub fn is_surface_attached(&self) -> bool {
        self.binding.is_attached()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The playback state as of the most recently processed engine event.
    pub fn playback_state(&self) -> PlaybackState {
        self.shared.state.load()
    }

    /// Total duration of the prepared media.
    ///
    /// Reads the engine directly from the calling thread.
    pub fn duration(&self) -> Result<Duration> {
        Ok(self.engine.duration()?)
    }

    /// Current playback position.
    ///
    /// Reads the engine directly from the calling thread.
    pub fn position(&self) -> Result<Duration> {
        Ok(self.engine.position()?)
    }
}

impl Drop for VideoPlayer {
    fn drop(&mut self) {
        if !self.drain_on_close {
            self.discard_pending.store(true, Ordering::Release);
        }

        // Unhook the readiness callback first: it holds a mailbox sender,
        // and the worker only exits once every sender is gone.
        self.binding.teardown();
        self.commands.take();

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("command worker panicked during shutdown");
            }
        }
    }
}
