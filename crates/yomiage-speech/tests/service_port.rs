//! Port-level tests for `PlaybackService`.
//!
//! These drive the `PlaybackPort` trait the way a GUI or HTTP adapter
//! would: actions through the port, rendering from the status DTO, and
//! events observed through a capturing `AppEventEmitter`. Engine callbacks
//! are injected through `spawn_synth_bridge`, exercising the same
//! serialized path a real engine would use.

#![allow(clippy::float_cmp)]

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use yomiage_core::domain::{PLACEHOLDER_TEXT, Utterance, UtteranceId};
use yomiage_core::events::AppEvent;
use yomiage_core::ports::{AppEventEmitter, NoopEmitter, PlaybackPort};
use yomiage_speech::engine::{Boundary, SpeechSynthesizer, SynthEvent};
use yomiage_speech::error::SpeechError;
use yomiage_speech::service::PlaybackService;

// ── Test doubles ───────────────────────────────────────────────────

/// Engine that accepts everything and remembers the last utterance id.
#[derive(Clone, Default)]
struct AcceptingEngine {
    last_utterance: Arc<Mutex<Option<UtteranceId>>>,
    stops: Arc<Mutex<usize>>,
}

impl AcceptingEngine {
    fn utterance_id(&self) -> UtteranceId {
        self.last_utterance.lock().unwrap().expect("no speak call recorded")
    }
}

impl SpeechSynthesizer for AcceptingEngine {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        *self.last_utterance.lock().unwrap() = Some(utterance.id);
        Ok(())
    }

    fn pause(&mut self, _boundary: Boundary) -> Result<(), SpeechError> {
        Ok(())
    }

    fn resume(&mut self) -> Result<(), SpeechError> {
        Ok(())
    }

    fn stop(&mut self, _boundary: Boundary) -> Result<(), SpeechError> {
        *self.stops.lock().unwrap() += 1;
        Ok(())
    }
}

/// Emitter that appends every event to a shared vector.
#[derive(Clone, Default)]
struct CapturingEmitter {
    events: Arc<Mutex<Vec<AppEvent>>>,
}

impl CapturingEmitter {
    fn events(&self) -> Vec<AppEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AppEventEmitter for CapturingEmitter {
    fn emit(&self, event: AppEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(self.clone())
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Yield to the runtime until `pred` holds (bounded, to fail fast).
async fn wait_until(mut pred: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if pred() {
            return true;
        }
        tokio::task::yield_now().await;
    }
    pred()
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn status_reflects_defaults() {
    let service = PlaybackService::new(
        Box::new(AcceptingEngine::default()),
        Arc::new(NoopEmitter::new()),
    );

    let status = service.status().await.unwrap();
    assert_eq!(status.state, "idle");
    assert_eq!(status.rate, 0.5);
    assert_eq!(status.pitch, 1.0);
    assert_eq!(status.voice_locale, "ja-JP");
    assert!(status.play_enabled);
    assert!(!status.pause_enabled);
    assert!(!status.stop_enabled);
    assert!(status.clear_enabled);
    assert_eq!(status.text, PLACEHOLDER_TEXT);
}

#[tokio::test]
async fn status_dto_serializes_camel_case() {
    let service = PlaybackService::new(
        Box::new(AcceptingEngine::default()),
        Arc::new(NoopEmitter::new()),
    );

    let status = service.status().await.unwrap();
    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["state"], "idle");
    assert_eq!(json["playEnabled"], true);
    assert_eq!(json["pauseEnabled"], false);
    assert_eq!(json["voiceLocale"], "ja-JP");
}

#[tokio::test]
async fn play_and_start_callback_flow_through_the_port() {
    let engine = AcceptingEngine::default();
    let emitter = CapturingEmitter::default();
    let service = PlaybackService::new(Box::new(engine.clone()), Arc::new(emitter.clone()));
    let (synth_tx, synth_rx) = mpsc::unbounded_channel();
    service.spawn_synth_bridge(synth_rx);

    service.set_text("読み上げ").await.unwrap();
    service.play().await.unwrap();

    let status = service.status().await.unwrap();
    assert_eq!(status.state, "speaking");
    assert!(!status.play_enabled);
    assert!(!status.pause_enabled, "pause lights up only after the start callback");

    synth_tx.send(SynthEvent::Started(engine.utterance_id())).unwrap();
    assert!(
        wait_until(|| {
            emitter
                .events()
                .contains(&AppEvent::SpeechStarted)
        })
        .await,
        "expected SpeechStarted, got {:?}",
        emitter.events()
    );

    let status = service.status().await.unwrap();
    assert!(status.pause_enabled);
    assert!(status.stop_enabled);

    // The bridge forwarded state + affordance events in order.
    let events = emitter.events();
    assert!(events.contains(&AppEvent::PlaybackStateChanged {
        state: "speaking".to_owned()
    }));
    assert!(events.iter().any(|e| matches!(
        e,
        AppEvent::AffordancesChanged { pause: true, stop: true, .. }
    )));
}

#[tokio::test]
async fn finish_callback_returns_port_to_idle() {
    let engine = AcceptingEngine::default();
    let emitter = CapturingEmitter::default();
    let service = PlaybackService::new(Box::new(engine.clone()), Arc::new(emitter.clone()));
    let (synth_tx, synth_rx) = mpsc::unbounded_channel();
    service.spawn_synth_bridge(synth_rx);

    service.play().await.unwrap();
    let id = engine.utterance_id();
    synth_tx.send(SynthEvent::Started(id)).unwrap();
    synth_tx.send(SynthEvent::Finished(id)).unwrap();

    assert!(
        wait_until(|| emitter.events().contains(&AppEvent::SpeechFinished)).await,
        "expected SpeechFinished, got {:?}",
        emitter.events()
    );

    let status = service.status().await.unwrap();
    assert_eq!(status.state, "idle");
    assert!(status.play_enabled);
    assert!(status.clear_enabled);
}

#[tokio::test]
async fn route_change_stops_exactly_once() {
    let engine = AcceptingEngine::default();
    let service = PlaybackService::new(Box::new(engine.clone()), Arc::new(NoopEmitter::new()));
    let (synth_tx, synth_rx) = mpsc::unbounded_channel();
    service.spawn_synth_bridge(synth_rx);

    service.play().await.unwrap();
    synth_tx.send(SynthEvent::Started(engine.utterance_id())).unwrap();

    service.audio_route_changed().await.unwrap();
    service.audio_route_changed().await.unwrap(); // second route change, still in flight

    assert_eq!(*engine.stops.lock().unwrap(), 2);

    // Once the cancel callback lands and the state is idle again, further
    // route changes are no-ops.
    synth_tx.send(SynthEvent::Cancelled(engine.utterance_id())).unwrap();
    for _ in 0..100 {
        if service.status().await.unwrap().state == "idle" {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(service.status().await.unwrap().state, "idle");

    service.audio_route_changed().await.unwrap();
    assert_eq!(*engine.stops.lock().unwrap(), 2);
}

#[tokio::test]
async fn clear_through_the_port_emits_text_replaced() {
    let emitter = CapturingEmitter::default();
    let service = PlaybackService::new(
        Box::new(AcceptingEngine::default()),
        Arc::new(emitter.clone()),
    );

    service.set_text("消える文章").await.unwrap();
    service.clear().await.unwrap();

    assert!(
        wait_until(|| {
            emitter.events().contains(&AppEvent::TextReplaced {
                text: PLACEHOLDER_TEXT.to_owned(),
            })
        })
        .await,
        "expected TextReplaced, got {:?}",
        emitter.events()
    );
    assert_eq!(service.status().await.unwrap().text, PLACEHOLDER_TEXT);
}

#[tokio::test]
async fn guarded_noops_return_ok_through_the_port() {
    let engine = AcceptingEngine::default();
    let service = PlaybackService::new(Box::new(engine.clone()), Arc::new(NoopEmitter::new()));

    // Nothing in flight: pause/stop are silently ignored.
    service.pause().await.unwrap();
    service.stop().await.unwrap();
    assert_eq!(*engine.stops.lock().unwrap(), 0);
    assert_eq!(service.status().await.unwrap().state, "idle");
}
