//! # Surface Binding Protocol
//!
//! Tracks the rendering sink the video output is (or will be) bound to.
//!
//! ## Overview
//!
//! A [`SurfaceSink`] either already exposes a usable drawable at the moment
//! it is set, or announces one later through a readiness callback. Binding
//! never touches the engine directly: when a drawable is usable, an attach
//! command is submitted to the command worker, which is the only thread
//! allowed to mutate the engine. Detaching goes through the worker the same
//! way.
//!
//! ## Sink Kinds
//!
//! Two implementations cover the two host view kinds:
//!
//! - [`HolderSink`] - backed by a window holder that may already own a
//!   valid drawable when the sink is bound; the host forwards the holder's
//!   surface lifecycle into [`HolderSink::surface_created`] /
//!   [`HolderSink::surface_destroyed`].
//! - [`TextureSink`] - backed by a texture that never exists at bind time;
//!   the host forwards texture availability into
//!   [`TextureSink::texture_available`].

use crate::command::{Command, CommandSender};
use engine_traits::{SurfaceDescriptor, SurfaceHandle};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Callback fired by a sink when its drawable becomes usable.
pub type ReadinessCallback = Arc<dyn Fn(SurfaceDescriptor) + Send + Sync>;

/// A rendering target the engine's video output can be bound to.
///
/// At most one sink is bound at a time; identity is `Arc` identity.
pub trait SurfaceSink: Send + Sync {
    /// Descriptor of the sink's drawable, if one is usable right now.
    fn ready_descriptor(&self) -> Option<SurfaceDescriptor>;

    /// Install the callback fired whenever the drawable becomes usable.
    ///
    /// Installing a new callback replaces the previous one.
    fn set_readiness_callback(&self, callback: ReadinessCallback);

    /// Remove the installed readiness callback, if any.
    fn clear_readiness_callback(&self);
}

struct SinkState {
    descriptor: Option<SurfaceDescriptor>,
    callback: Option<ReadinessCallback>,
}

impl SinkState {
    fn empty() -> Self {
        Self {
            descriptor: None,
            callback: None,
        }
    }
}

/// Sink backed by a window holder (a surface-view-like host object).
///
/// The holder may already own a valid drawable when the sink is bound to a
/// player, in which case the attach is submitted immediately instead of
/// waiting for a readiness event.
pub struct HolderSink {
    state: Mutex<SinkState>,
}

impl HolderSink {
    /// Create a sink whose holder has no drawable yet.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SinkState::empty()),
        }
    }

    /// Create a sink whose holder already owns a valid drawable.
    pub fn with_surface(descriptor: SurfaceDescriptor) -> Self {
        Self {
            state: Mutex::new(SinkState {
                descriptor: Some(descriptor),
                callback: None,
            }),
        }
    }

    /// The holder created (or recreated) its drawable.
    pub fn surface_created(&self, descriptor: SurfaceDescriptor) {
        let callback = {
            let mut state = self.state.lock();
            state.descriptor = Some(descriptor);
            state.callback.clone()
        };
        // Fired outside the lock: the callback submits into the mailbox and
        // must not be able to re-enter this sink under our lock.
        if let Some(callback) = callback {
            callback(descriptor);
        }
    }

    /// The holder's drawable was destroyed.
    pub fn surface_destroyed(&self) {
        self.state.lock().descriptor = None;
    }
}

impl Default for HolderSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceSink for HolderSink {
    fn ready_descriptor(&self) -> Option<SurfaceDescriptor> {
        self.state.lock().descriptor
    }

    fn set_readiness_callback(&self, callback: ReadinessCallback) {
        self.state.lock().callback = Some(callback);
    }

    fn clear_readiness_callback(&self) {
        self.state.lock().callback = None;
    }
}

/// Sink backed by a texture (a texture-view-like host object).
///
/// The texture never exists when the sink is constructed; the drawable
/// descriptor is assembled from the raw handle and size the host reports
/// once the texture becomes available.
pub struct TextureSink {
    state: Mutex<SinkState>,
}

impl TextureSink {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SinkState::empty()),
        }
    }

    /// The host's texture became available at the given size.
    pub fn texture_available(&self, handle: SurfaceHandle, width: u32, height: u32) {
        let descriptor = SurfaceDescriptor::new(handle, width, height);
        let callback = {
            let mut state = self.state.lock();
            state.descriptor = Some(descriptor);
            state.callback.clone()
        };
        if let Some(callback) = callback {
            callback(descriptor);
        }
    }

    /// The host's texture was destroyed.
    pub fn texture_destroyed(&self) {
        self.state.lock().descriptor = None;
    }
}

impl Default for TextureSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceSink for TextureSink {
    fn ready_descriptor(&self) -> Option<SurfaceDescriptor> {
        self.state.lock().descriptor
    }

    fn set_readiness_callback(&self, callback: ReadinessCallback) {
        self.state.lock().callback = Some(callback);
    }

    fn clear_readiness_callback(&self) {
        self.state.lock().callback = None;
    }
}

/// Tracks the currently bound sink and routes attach/detach through the
/// command worker.
pub(crate) struct SurfaceBinding {
    current: Mutex<Option<Arc<dyn SurfaceSink>>>,
    attached: AtomicBool,
}

impl SurfaceBinding {
    pub(crate) fn new() -> Self {
        Self {
            current: Mutex::new(None),
            attached: AtomicBool::new(false),
        }
    }

    /// Bind `sink` as the video target.
    ///
    /// Re-binding the currently bound sink is a no-op. Replacing a sink
    /// unregisters the previous sink's readiness callback before anything
    /// else, so a late readiness event from a superseded sink can never
    /// leak an attach.
    pub(crate) fn set_sink(&self, sink: Arc<dyn SurfaceSink>, commands: &CommandSender) {
        let mut current = self.current.lock();
        if let Some(existing) = current.as_ref() {
            if Arc::ptr_eq(existing, &sink) {
                trace!("sink already bound, ignoring");
                return;
            }
            existing.clear_readiness_callback();
        }
        *current = Some(Arc::clone(&sink));

        if let Some(descriptor) = sink.ready_descriptor() {
            debug!(
                width = descriptor.width,
                height = descriptor.height,
                "sink ready at bind time, submitting attach"
            );
            commands.submit(Command::AttachSurface(descriptor));
        } else {
            debug!("sink not ready, deferring attach until readiness");
            let commands = commands.clone();
            sink.set_readiness_callback(Arc::new(move |descriptor| {
                commands.submit(Command::AttachSurface(descriptor));
            }));
        }
    }

    /// Unbind `sink` if it is the currently bound sink.
    ///
    /// A stale caller clearing a sink that has already been replaced is a
    /// no-op: no detach is submitted and the stale sink's callbacks are
    /// left alone.
    pub(crate) fn clear_sink(&self, sink: &Arc<dyn SurfaceSink>, commands: &CommandSender) {
        let mut current = self.current.lock();
        let is_current = current
            .as_ref()
            .map(|existing| Arc::ptr_eq(existing, sink))
            .unwrap_or(false);
        if !is_current {
            trace!("clear of a non-current sink, ignoring");
            return;
        }

        if let Some(existing) = current.take() {
            existing.clear_readiness_callback();
        }
        self.attached.store(false, Ordering::Release);
        commands.submit(Command::DetachSurface);
    }

    /// Drop the current sink reference and its readiness callback without
    /// touching the engine. Used during player teardown.
    pub(crate) fn teardown(&self) {
        let mut current = self.current.lock();
        if let Some(existing) = current.take() {
            existing.clear_readiness_callback();
        }
        self.attached.store(false, Ordering::Release);
    }

    /// Record whether the engine's views are currently attached. Written by
    /// the command worker when an attach or detach executes.
    pub(crate) fn mark_attached(&self, attached: bool) {
        self.attached.store(attached, Ordering::Release);
    }

    /// Whether the engine's views are currently attached.
    pub(crate) fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn descriptor(width: u32, height: u32) -> SurfaceDescriptor {
        SurfaceDescriptor::new(SurfaceHandle::from_raw(0x10), width, height)
    }

    #[test]
    fn holder_sink_reports_existing_surface() {
        let sink = HolderSink::with_surface(descriptor(1280, 720));
        assert_eq!(sink.ready_descriptor(), Some(descriptor(1280, 720)));

        sink.surface_destroyed();
        assert_eq!(sink.ready_descriptor(), None);
    }

    #[test]
    fn texture_sink_starts_unready() {
        let sink = TextureSink::new();
        assert_eq!(sink.ready_descriptor(), None);

        sink.texture_available(SurfaceHandle::from_raw(0x10), 640, 360);
        assert_eq!(sink.ready_descriptor(), Some(descriptor(640, 360)));
    }

    #[test]
    fn readiness_callback_fires_on_creation() {
        let sink = HolderSink::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let observed = fired.clone();
        sink.set_readiness_callback(Arc::new(move |d| {
            assert_eq!(d.width, 800);
            observed.fetch_add(1, Ordering::SeqCst);
        }));

        sink.surface_created(descriptor(800, 600));
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // A recreated surface notifies again.
        sink.surface_created(descriptor(800, 600));
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cleared_callback_no_longer_fires() {
        let sink = TextureSink::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let observed = fired.clone();
        sink.set_readiness_callback(Arc::new(move |_| {
            observed.fetch_add(1, Ordering::SeqCst);
        }));
        sink.clear_readiness_callback();

        sink.texture_available(SurfaceHandle::from_raw(0x10), 640, 360);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    fn command_probe() -> (CommandSender, tokio::sync::mpsc::UnboundedReceiver<Command>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (CommandSender::new(tx), rx)
    }

    fn drain_commands(rx: &mut tokio::sync::mpsc::UnboundedReceiver<Command>) -> Vec<String> {
        let mut drained = Vec::new();
        while let Ok(command) = rx.try_recv() {
            drained.push(match command {
                Command::AttachSurface(d) => format!("attach:{}x{}", d.width, d.height),
                Command::DetachSurface => "detach".to_string(),
                other => format!("{other:?}"),
            });
        }
        drained
    }

    #[test]
    fn ready_sink_attaches_once_per_bind() {
        let (commands, mut rx) = command_probe();
        let binding = SurfaceBinding::new();
        let sink: Arc<dyn SurfaceSink> = Arc::new(HolderSink::with_surface(descriptor(1280, 720)));

        binding.set_sink(sink.clone(), &commands);
        binding.set_sink(sink, &commands);

        assert_eq!(drain_commands(&mut rx), vec!["attach:1280x720"]);
    }

    #[test]
    fn unready_sink_defers_attach_until_readiness() {
        let (commands, mut rx) = command_probe();
        let binding = SurfaceBinding::new();
        let sink = Arc::new(TextureSink::new());

        binding.set_sink(sink.clone(), &commands);
        assert!(drain_commands(&mut rx).is_empty());

        sink.texture_available(SurfaceHandle::from_raw(0x10), 640, 360);
        assert_eq!(drain_commands(&mut rx), vec!["attach:640x360"]);
    }

    #[test]
    fn replaced_sink_cannot_leak_a_late_attach() {
        let (commands, mut rx) = command_probe();
        let binding = SurfaceBinding::new();
        let first = Arc::new(TextureSink::new());
        let second: Arc<dyn SurfaceSink> = Arc::new(TextureSink::new());

        binding.set_sink(first.clone(), &commands);
        binding.set_sink(second, &commands);

        // Readiness of the superseded sink must not attach anything.
        first.texture_available(SurfaceHandle::from_raw(0x10), 640, 360);
        assert!(drain_commands(&mut rx).is_empty());
    }

    #[test]
    fn clear_of_current_sink_detaches() {
        let (commands, mut rx) = command_probe();
        let binding = SurfaceBinding::new();
        let sink: Arc<dyn SurfaceSink> = Arc::new(HolderSink::with_surface(descriptor(1280, 720)));

        binding.set_sink(sink.clone(), &commands);
        binding.clear_sink(&sink, &commands);

        assert_eq!(drain_commands(&mut rx), vec!["attach:1280x720", "detach"]);
    }

    #[test]
    fn clear_of_stale_sink_is_a_no_op() {
        let (commands, mut rx) = command_probe();
        let binding = SurfaceBinding::new();
        let bound: Arc<dyn SurfaceSink> = Arc::new(HolderSink::with_surface(descriptor(1280, 720)));
        let stale_texture = Arc::new(TextureSink::new());
        let stale: Arc<dyn SurfaceSink> = stale_texture.clone();

        binding.set_sink(bound, &commands);
        drain_commands(&mut rx);

        // Install a probe callback so listener removal would be observable.
        let fired = Arc::new(AtomicUsize::new(0));
        let observed = fired.clone();
        stale.set_readiness_callback(Arc::new(move |_| {
            observed.fetch_add(1, Ordering::SeqCst);
        }));

        binding.clear_sink(&stale, &commands);
        assert!(drain_commands(&mut rx).is_empty());

        // The stale sink's own callback was left alone.
        stale_texture.texture_available(SurfaceHandle::from_raw(0x11), 320, 240);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
