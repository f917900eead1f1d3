//! Integration tests for the surface binding protocol.
//!
//! Exercises sink binding through the public player API: attach must only
//! ever execute on the command worker, deferred until the sink's drawable
//! is usable, and never duplicated or leaked across sink replacement.

use core_player::{HolderSink, SurfaceSink, TextureSink, VideoPlayer};
use engine_traits::{
    EngineEventHandler, Media, MediaEngine, SurfaceDescriptor, SurfaceHandle,
};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::Duration;

/// Engine stub recording surface-related calls.
struct RecordingEngine {
    calls: Mutex<Vec<String>>,
    call_signal: Condvar,
}

impl RecordingEngine {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            call_signal: Condvar::new(),
        })
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
        self.call_signal.notify_all();
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn wait_for_calls(&self, count: usize) {
        let mut calls = self.calls.lock();
        while calls.len() < count {
            if self
                .call_signal
                .wait_for(&mut calls, Duration::from_secs(5))
                .timed_out()
            {
                panic!(
                    "timed out waiting for {count} engine calls, got {:?}",
                    *calls
                );
            }
        }
    }
}

impl MediaEngine for RecordingEngine {
    fn set_event_handler(&self, _handler: Arc<dyn EngineEventHandler>) {}

    fn prepare(&self, media: &Media) -> engine_traits::Result<()> {
        self.record(format!("prepare:{}", media.location()));
        Ok(())
    }

    fn play(&self) -> engine_traits::Result<()> {
        self.record("play");
        Ok(())
    }

    fn pause(&self) -> engine_traits::Result<()> {
        self.record("pause");
        Ok(())
    }

    fn stop(&self) -> engine_traits::Result<()> {
        self.record("stop");
        Ok(())
    }

    fn seek(&self, position: Duration) -> engine_traits::Result<()> {
        self.record(format!("seek:{}", position.as_millis()));
        Ok(())
    }

    fn attach_surface(&self, descriptor: &SurfaceDescriptor) -> engine_traits::Result<()> {
        self.record(format!("attach:{}x{}", descriptor.width, descriptor.height));
        Ok(())
    }

    fn detach_surface(&self) -> engine_traits::Result<()> {
        self.record("detach");
        Ok(())
    }

    fn release(&self) -> engine_traits::Result<()> {
        self.record("release");
        Ok(())
    }

    fn duration(&self) -> engine_traits::Result<Duration> {
        Ok(Duration::ZERO)
    }

    fn position(&self) -> engine_traits::Result<Duration> {
        Ok(Duration::ZERO)
    }
}

fn descriptor(width: u32, height: u32) -> SurfaceDescriptor {
    SurfaceDescriptor::new(SurfaceHandle::from_raw(0x20), width, height)
}

#[test]
fn unready_sink_attaches_only_after_readiness() {
    let engine = RecordingEngine::new();
    let player = VideoPlayer::new(engine.clone()).unwrap();
    let sink = Arc::new(TextureSink::new());

    player.set_video_sink(sink.clone());
    // Nothing was ever submitted, so nothing can have executed.
    assert!(engine.calls().is_empty());
    assert!(!player.is_surface_attached());

    sink.texture_available(SurfaceHandle::from_raw(0x20), 640, 360);
    engine.wait_for_calls(1);

    assert_eq!(engine.calls(), vec!["attach:640x360"]);
    assert!(player.is_surface_attached());
}

#[test]
fn ready_sink_attaches_immediately() {
    let engine = RecordingEngine::new();
    let player = VideoPlayer::new(engine.clone()).unwrap();
    let sink: Arc<dyn SurfaceSink> = Arc::new(HolderSink::with_surface(descriptor(1280, 720)));

    player.set_video_sink(sink);
    engine.wait_for_calls(1);

    assert_eq!(engine.calls(), vec!["attach:1280x720"]);
    assert!(player.is_surface_attached());
}

#[test]
fn rebinding_the_same_sink_never_double_attaches() {
    let engine = RecordingEngine::new();
    let player = VideoPlayer::new(engine.clone()).unwrap();
    let sink: Arc<dyn SurfaceSink> = Arc::new(HolderSink::with_surface(descriptor(1280, 720)));

    player.set_video_sink(sink.clone());
    player.set_video_sink(sink);
    drop(player);

    assert_eq!(engine.calls(), vec!["attach:1280x720"]);
}

#[test]
fn replacing_a_sink_drops_the_old_readiness_registration() {
    let engine = RecordingEngine::new();
    let player = VideoPlayer::new(engine.clone()).unwrap();
    let first = Arc::new(TextureSink::new());
    let second: Arc<dyn SurfaceSink> = Arc::new(TextureSink::new());

    player.set_video_sink(first.clone());
    player.set_video_sink(second);

    // The superseded sink becoming ready must not attach for it.
    first.texture_available(SurfaceHandle::from_raw(0x21), 320, 240);
    drop(player);

    assert!(engine.calls().is_empty());
}

#[test]
fn clearing_the_current_sink_detaches_on_the_worker() {
    let engine = RecordingEngine::new();
    let player = VideoPlayer::new(engine.clone()).unwrap();
    let sink: Arc<dyn SurfaceSink> = Arc::new(HolderSink::with_surface(descriptor(1280, 720)));

    player.set_video_sink(sink.clone());
    engine.wait_for_calls(1);
    assert!(player.is_surface_attached());

    player.clear_video_sink(&sink);
    engine.wait_for_calls(2);

    assert_eq!(engine.calls(), vec!["attach:1280x720", "detach"]);
    assert!(!player.is_surface_attached());
}

#[test]
fn clearing_a_stale_sink_has_no_effect() {
    let engine = RecordingEngine::new();
    let player = VideoPlayer::new(engine.clone()).unwrap();
    let bound: Arc<dyn SurfaceSink> = Arc::new(HolderSink::with_surface(descriptor(1280, 720)));
    let stale: Arc<dyn SurfaceSink> = Arc::new(HolderSink::with_surface(descriptor(320, 240)));

    player.set_video_sink(bound);
    engine.wait_for_calls(1);

    player.clear_video_sink(&stale);
    drop(player);

    assert_eq!(engine.calls(), vec!["attach:1280x720"]);
}

#[test]
fn recreated_surface_reattaches_after_deferred_bind() {
    // A sink bound before it was ready keeps its readiness registration:
    // each readiness event submits exactly one attach.
    let engine = RecordingEngine::new();
    let player = VideoPlayer::new(engine.clone()).unwrap();
    let sink = Arc::new(HolderSink::new());

    player.set_video_sink(sink.clone());
    sink.surface_created(descriptor(640, 360));
    engine.wait_for_calls(1);

    sink.surface_destroyed();
    sink.surface_created(descriptor(800, 600));
    engine.wait_for_calls(2);

    assert_eq!(engine.calls(), vec!["attach:640x360", "attach:800x600"]);
}
