//! # Command Mailbox & Worker
//!
//! Serializes every engine-mutating operation onto one dedicated thread.
//!
//! ## Architecture
//!
//! ```text
//! caller threads          command worker              native engine
//! ┌────────────┐  submit  ┌──────────────────┐  call  ┌────────────┐
//! │ prepare()  ├─────────>│                  ├───────>│            │
//! │ play()     ├─────────>│ unbounded FIFO   │        │ MediaEngine│
//! │ seek_to()  ├─────────>│ drained one at a │        │  adapter   │
//! │ ...        │          │ time, in order   │        │            │
//! └────────────┘          └──────────────────┘        └────────────┘
//! ```
//!
//! `submit` is callable from any thread, never blocks, and returns before
//! the command executes. The mailbox is unbounded: there is no coalescing,
//! no backpressure, and no cancellation of queued commands.
//!
//! ## Failure Semantics
//!
//! A command that fails inside the engine is logged and discarded; the
//! worker moves on to the next command. Once a `Release` has been drained
//! the worker is poisoned: everything drained afterwards is dropped without
//! any engine call.

use crate::surface::SurfaceBinding;
use engine_traits::{EngineError, Media, MediaEngine, SurfaceDescriptor};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// One unit of requested work for the command worker.
///
/// Immutable once enqueued.
#[derive(Debug, Clone)]
pub(crate) enum Command {
    Prepare(Media),
    Play,
    Pause,
    Repeat,
    Stop,
    Release,
    SeekTo(std::time::Duration),
    AttachSurface(SurfaceDescriptor),
    DetachSurface,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Prepare(_) => "prepare",
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Repeat => "repeat",
            Command::Stop => "stop",
            Command::Release => "release",
            Command::SeekTo(_) => "seek_to",
            Command::AttachSurface(_) => "attach_surface",
            Command::DetachSurface => "detach_surface",
        }
    }
}

/// Fire-and-forget handle onto the worker's mailbox.
#[derive(Clone)]
pub(crate) struct CommandSender {
    tx: mpsc::UnboundedSender<Command>,
}

impl CommandSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Command>) -> Self {
        Self { tx }
    }

    /// Enqueue a command. Never blocks; returns before the command runs.
    ///
    /// If the worker is gone the command is dropped silently; the control
    /// API is failure-opaque.
    pub(crate) fn submit(&self, command: Command) {
        let name = command.name();
        if self.tx.send(command).is_err() {
            debug!(command = name, "command worker gone, dropping command");
        }
    }
}

/// Executes drained commands against the engine. Lives entirely on the
/// worker thread; `current_media` is worker-local state.
struct CommandExecutor {
    engine: Arc<dyn MediaEngine>,
    binding: Arc<SurfaceBinding>,
    current_media: Option<Media>,
}

impl CommandExecutor {
    fn new(engine: Arc<dyn MediaEngine>, binding: Arc<SurfaceBinding>) -> Self {
        Self {
            engine,
            binding,
            current_media: None,
        }
    }

    fn execute(&mut self, command: Command) -> engine_traits::Result<()> {
        match command {
            Command::Prepare(media) => {
                self.engine.prepare(&media)?;
                self.current_media = Some(media);
                Ok(())
            }
            Command::Play => self.engine.play(),
            Command::Pause => self.engine.pause(),
            Command::Repeat => {
                let media = self
                    .current_media
                    .as_ref()
                    .ok_or(EngineError::NoMediaLoaded)?;
                self.engine.prepare(media)?;
                self.engine.play()
            }
            Command::Stop => self.engine.stop(),
            Command::Release => self.engine.release(),
            Command::SeekTo(position) => self.engine.seek(position),
            Command::AttachSurface(descriptor) => {
                self.engine.attach_surface(&descriptor)?;
                self.binding.mark_attached(true);
                Ok(())
            }
            Command::DetachSurface => {
                self.engine.detach_surface()?;
                self.binding.mark_attached(false);
                Ok(())
            }
        }
    }
}

/// Start the dedicated worker thread draining `mailbox`.
///
/// The worker exits once the mailbox is closed and drained. When
/// `discard_pending` is set the remaining commands are dropped instead of
/// executed, which is how a fast shutdown is implemented.
pub(crate) fn spawn_command_worker(
    thread_name: &str,
    engine: Arc<dyn MediaEngine>,
    binding: Arc<SurfaceBinding>,
    mut mailbox: mpsc::UnboundedReceiver<Command>,
    discard_pending: Arc<AtomicBool>,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name(thread_name.to_owned())
        .spawn(move || {
            let mut executor = CommandExecutor::new(engine, binding);
            let mut released = false;

            while let Some(command) = mailbox.blocking_recv() {
                if released {
                    debug!(command = command.name(), "dropping command drained after release");
                    continue;
                }
                if discard_pending.load(Ordering::Acquire) {
                    debug!(command = command.name(), "dropping command during shutdown");
                    continue;
                }

                let name = command.name();
                let is_release = matches!(command, Command::Release);
                trace!(command = name, "executing command");

                if let Err(error) = executor.execute(command) {
                    warn!(command = name, %error, "command failed, continuing with next");
                }

                if is_release {
                    released = true;
                    debug!("release drained, worker no longer accepts engine work");
                }
            }

            debug!("command mailbox closed, worker exiting");
        })
}
