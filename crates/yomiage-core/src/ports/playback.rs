//! Playback port — trait abstraction for the read-aloud screen's actions.
//!
//! # Design Rules
//!
//! - DTOs here are transport-agnostic wire shapes (no `yomiage-speech`
//!   types beyond the shared domain model).
//! - [`PlaybackPort`] is the only surface a GUI or HTTP adapter needs in
//!   order to drive the whole screen: the four toolbar actions, the two
//!   sliders, text editing, and the external audio-route trigger.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── DTOs ─────────────────────────────────────────────────────────────────────

/// Snapshot of the controller for presentation layers.
// Wire-shape DTO: the four bools are the per-control enabled flags the
// screen renders from; callers read them straight out of the JSON payload.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStatusDto {
    /// State machine label (`"idle"`, `"speaking"`, `"paused"`).
    pub state: String,
    /// Current rate slider value.
    pub rate: f32,
    /// Current pitch slider value.
    pub pitch: f32,
    /// Voice locale passed to the engine.
    pub voice_locale: String,
    /// Whether the play control is enabled.
    pub play_enabled: bool,
    /// Whether the pause control is enabled.
    pub pause_enabled: bool,
    /// Whether the stop control is enabled.
    pub stop_enabled: bool,
    /// Whether the clear control is enabled.
    pub clear_enabled: bool,
    /// Current contents of the text buffer.
    pub text: String,
}

// ── Error ─────────────────────────────────────────────────────────────────────

/// Errors returned by [`PlaybackPort`] operations.
#[derive(Debug, Error)]
pub enum PlaybackPortError {
    /// The synthesis engine rejected a request.
    #[error("Engine error: {0}")]
    Engine(String),

    /// Unexpected internal error.
    #[error("Internal playback error: {0}")]
    Internal(String),
}

// ── Port trait ────────────────────────────────────────────────────────────────

/// Port trait for the playback screen's actions.
///
/// Implemented by `PlaybackService` in `yomiage-speech`. Consumed by
/// presentation adapters, which render entirely from [`PlaybackStatusDto`]
/// and the [`AppEvent`](crate::events::AppEvent) stream.
///
/// Guarded no-ops (play while speaking, pause while paused, stop while
/// idle, clear outside idle) return `Ok(())` — invalid transition attempts
/// are silently ignored, never surfaced to the user.
#[async_trait]
pub trait PlaybackPort: Send + Sync {
    /// Return the current controller snapshot.
    async fn status(&self) -> Result<PlaybackStatusDto, PlaybackPortError>;

    /// Play the current text, or resume if paused.
    async fn play(&self) -> Result<(), PlaybackPortError>;

    /// Pause the running utterance at the immediate boundary.
    async fn pause(&self) -> Result<(), PlaybackPortError>;

    /// Stop the running utterance at the immediate boundary.
    async fn stop(&self) -> Result<(), PlaybackPortError>;

    /// Replace the text buffer with the placeholder (idle only).
    async fn clear(&self) -> Result<(), PlaybackPortError>;

    /// Replace the text buffer with edited contents.
    async fn set_text(&self, text: &str) -> Result<(), PlaybackPortError>;

    /// Record a new rate slider value (read at the next play).
    async fn set_rate(&self, rate: f32) -> Result<(), PlaybackPortError>;

    /// Record a new pitch slider value (read at the next play).
    async fn set_pitch(&self, pitch: f32) -> Result<(), PlaybackPortError>;

    /// External trigger: the audio route changed (device unplugged).
    async fn audio_route_changed(&self) -> Result<(), PlaybackPortError>;
}
