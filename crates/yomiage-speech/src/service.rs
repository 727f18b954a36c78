//! `PlaybackService` — the adapter that implements `PlaybackPort`.
//!
//! This module is the single place where controller-native types are
//! converted to the transport-agnostic DTOs and events defined in
//! `yomiage-core`.
//!
//! # Locking discipline
//!
//! All mutations use `controller.write().await`; `status()` uses
//! `controller.read().await`. Engine lifecycle callbacks are fed through
//! the same write lock by [`spawn_synth_bridge`], which keeps them on the
//! same serialized path as user actions — the controller itself never
//! locks.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, mpsc};
use tracing::info;

use yomiage_core::events::AppEvent;
use yomiage_core::ports::AppEventEmitter;
use yomiage_core::ports::playback::{PlaybackPort, PlaybackPortError, PlaybackStatusDto};

use crate::controller::{ControllerEvent, PlaybackController};
use crate::engine::{SpeechSynthesizer, SynthEvent};
use crate::error::SpeechError;

// ── Service struct ────────────────────────────────────────────────────────────

/// Implements [`PlaybackPort`] by wrapping the shared controller state.
pub struct PlaybackService {
    controller: Arc<RwLock<PlaybackController>>,
}

impl PlaybackService {
    /// Create a service around a controller that owns `engine`.
    ///
    /// The controller's event channel is bridged to `emitter` via
    /// [`spawn_event_bridge`].
    #[must_use]
    pub fn new(engine: Box<dyn SpeechSynthesizer>, emitter: Arc<dyn AppEventEmitter>) -> Self {
        let (controller, event_rx) = PlaybackController::new(engine);
        spawn_event_bridge(event_rx, emitter);
        Self {
            controller: Arc::new(RwLock::new(controller)),
        }
    }

    /// Feed an engine's lifecycle events into the controller.
    ///
    /// The spawned task self-terminates when the engine's sender is
    /// dropped: `recv()` returns `None` and the loop exits.
    pub fn spawn_synth_bridge(&self, mut synth_rx: mpsc::UnboundedReceiver<SynthEvent>) {
        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move {
            while let Some(event) = synth_rx.recv().await {
                controller.write().await.handle_synth_event(event);
            }
            // synth_rx returned None: engine sender dropped — task exits.
        });
    }
}

// ── Event bridge ─────────────────────────────────────────────────────────────

/// Bridge `ControllerEvent` → `AppEvent`, forwarding each event to `emitter`.
///
/// The spawned task self-terminates when the controller's sender is dropped
/// (i.e. when [`PlaybackController`] is destroyed): `recv()` returns `None`
/// and the `while let` loop exits.
pub fn spawn_event_bridge(
    mut event_rx: mpsc::UnboundedReceiver<ControllerEvent>,
    emitter: Arc<dyn AppEventEmitter>,
) {
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                ControllerEvent::StateChanged(state) => {
                    emitter.emit(AppEvent::state_changed(state));
                }
                ControllerEvent::Affordances(flags) => {
                    emitter.emit(AppEvent::affordances(flags));
                }
                ControllerEvent::SpeechStarted => {
                    emitter.emit(AppEvent::SpeechStarted);
                }
                ControllerEvent::SpeechFinished => {
                    emitter.emit(AppEvent::SpeechFinished);
                }
                ControllerEvent::SpeechCancelled => {
                    emitter.emit(AppEvent::SpeechCancelled);
                }
                ControllerEvent::TextReplaced(text) => {
                    emitter.emit(AppEvent::TextReplaced { text });
                }
            }
        }
        // event_rx returned None: controller sender dropped — task exits.
    });
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Convert a `SpeechError` into its closest `PlaybackPortError` equivalent.
///
/// This conversion lives here, in `yomiage-speech`, so that `yomiage-core`
/// never needs to import engine types. The dependency arrow stays one-way.
fn to_port_err(e: SpeechError) -> PlaybackPortError {
    match e {
        SpeechError::Engine(s) | SpeechError::EngineInit(s) => PlaybackPortError::Engine(s),
        SpeechError::Unsupported(op) => PlaybackPortError::Engine(format!("unsupported: {op}")),
    }
}

// ── PlaybackPort implementation ──────────────────────────────────────────────

#[async_trait]
impl PlaybackPort for PlaybackService {
    async fn status(&self) -> Result<PlaybackStatusDto, PlaybackPortError> {
        // Shared read lock — does not block other concurrent reads.
        let guard = self.controller.read().await;
        let flags = guard.affordances();
        let dto = PlaybackStatusDto {
            state: guard.state().label().to_owned(),
            rate: guard.params().rate,
            pitch: guard.params().pitch,
            voice_locale: guard.params().voice_locale.clone(),
            play_enabled: flags.play,
            pause_enabled: flags.pause,
            stop_enabled: flags.stop,
            clear_enabled: flags.clear,
            text: guard.text().to_owned(),
        };
        drop(guard);
        Ok(dto)
    }

    async fn play(&self) -> Result<(), PlaybackPortError> {
        let mut guard = self.controller.write().await;
        let result = guard.play().map_err(to_port_err);
        drop(guard);
        result?;
        info!("Play requested");
        Ok(())
    }

    async fn pause(&self) -> Result<(), PlaybackPortError> {
        let mut guard = self.controller.write().await;
        let result = guard.pause().map_err(to_port_err);
        drop(guard);
        result
    }

    async fn stop(&self) -> Result<(), PlaybackPortError> {
        let mut guard = self.controller.write().await;
        let result = guard.stop().map_err(to_port_err);
        drop(guard);
        result
    }

    async fn clear(&self) -> Result<(), PlaybackPortError> {
        self.controller.write().await.clear();
        Ok(())
    }

    async fn set_text(&self, text: &str) -> Result<(), PlaybackPortError> {
        self.controller.write().await.set_text(text);
        Ok(())
    }

    async fn set_rate(&self, rate: f32) -> Result<(), PlaybackPortError> {
        self.controller.write().await.set_rate(rate);
        Ok(())
    }

    async fn set_pitch(&self, pitch: f32) -> Result<(), PlaybackPortError> {
        self.controller.write().await.set_pitch(pitch);
        Ok(())
    }

    async fn audio_route_changed(&self) -> Result<(), PlaybackPortError> {
        let mut guard = self.controller.write().await;
        let result = guard.audio_route_changed().map_err(to_port_err);
        drop(guard);
        result
    }
}
