//! Utterance playback controller — the state machine behind the screen.
//!
//! ```text
//!   Idle ──play──▶ Starting ──Started──▶ Speaking ──pause──▶ Paused
//!    ▲                │                     │    ◀──play────────┘
//!    │                │                     │
//!    └── Finished/Cancelled ◀───────────────┴──────────────── (stop)
//! ```
//!
//! All transitions occur on one serialized path: user actions and engine
//! callbacks are both delivered as plain method calls, and the controller
//! performs no internal locking. Every transition recomputes the affordance
//! flags from the new state and emits them, so the flags can never drift
//! out of sync with the machine.

use tokio::sync::mpsc;

use yomiage_core::domain::{
    AffordanceFlags, PLACEHOLDER_TEXT, PlaybackState, SpeechParams, Utterance, UtteranceId,
};

use crate::engine::{Boundary, SpeechSynthesizer, SynthEvent};
use crate::error::SpeechError;

// ── Events emitted by the controller ───────────────────────────────

/// Events emitted by the controller to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// State machine moved to a new state.
    StateChanged(PlaybackState),

    /// Control flags recomputed for the new state.
    Affordances(AffordanceFlags),

    /// The engine confirmed speech began.
    SpeechStarted,

    /// The utterance was read to its end.
    SpeechFinished,

    /// The utterance was cut short.
    SpeechCancelled,

    /// The text buffer was replaced (clear).
    TextReplaced(String),
}

// ── Controller ─────────────────────────────────────────────────────

/// The utterance playback controller.
///
/// Owns the engine, the current text buffer, the live slider values, and
/// the play/pause/idle state. Emits [`ControllerEvent`]s via a channel for
/// the presentation layer to consume.
pub struct PlaybackController {
    /// The synthesis engine, exclusively owned for the screen's lifetime.
    engine: Box<dyn SpeechSynthesizer>,

    /// Current state. All affordance flags derive from this.
    state: PlaybackState,

    /// Live slider values; snapshotted into an utterance at play time.
    params: SpeechParams,

    /// Current text buffer contents.
    text: String,

    /// Id of the utterance the engine currently owns, if any.
    in_flight: Option<UtteranceId>,

    /// Source for the next utterance id.
    next_utterance: u64,

    /// Event sender channel.
    event_tx: mpsc::UnboundedSender<ControllerEvent>,
}

impl PlaybackController {
    /// Create a new controller in the Idle state.
    ///
    /// Returns the controller and a receiver for [`ControllerEvent`]s.
    #[must_use]
    pub fn new(
        engine: Box<dyn SpeechSynthesizer>,
    ) -> (Self, mpsc::UnboundedReceiver<ControllerEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let controller = Self {
            engine,
            state: PlaybackState::Idle,
            params: SpeechParams::default(),
            text: PLACEHOLDER_TEXT.to_string(),
            in_flight: None,
            next_utterance: 0,
            event_tx,
        };

        (controller, event_rx)
    }

    /// Get the current state.
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Get the control flags for the current state.
    #[must_use]
    pub const fn affordances(&self) -> AffordanceFlags {
        AffordanceFlags::for_state(self.state)
    }

    /// Get the live slider values.
    #[must_use]
    pub const fn params(&self) -> &SpeechParams {
        &self.params
    }

    /// Get the current text buffer contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    // ── User actions ───────────────────────────────────────────────

    /// Play the current text, or resume a paused utterance.
    ///
    /// From Idle, snapshots the text and slider values into a fresh
    /// [`Utterance`] and hands it to the engine; the state moves to
    /// Starting until the engine's start callback confirms playback.
    /// While Starting or Speaking this is a guarded no-op, so a stray
    /// play press can never double-start speech.
    pub fn play(&mut self) -> Result<(), SpeechError> {
        match self.state {
            PlaybackState::Idle => {
                let utterance = Utterance {
                    id: self.allocate_utterance_id(),
                    text: self.text.clone(),
                    params: self.params.clone(),
                };
                self.engine.speak(&utterance)?;
                self.in_flight = Some(utterance.id);
                self.set_state(PlaybackState::Starting);
                Ok(())
            }
            PlaybackState::Paused => {
                self.engine.resume()?;
                self.set_state(PlaybackState::Speaking);
                Ok(())
            }
            PlaybackState::Starting | PlaybackState::Speaking => {
                tracing::debug!(state = ?self.state, "Play ignored: speech already in flight");
                Ok(())
            }
        }
    }

    /// Pause the running utterance at the immediate boundary.
    ///
    /// Idempotent: pausing while already Paused is a no-op, as is pausing
    /// while nothing is confirmed to be playing.
    pub fn pause(&mut self) -> Result<(), SpeechError> {
        match self.state {
            PlaybackState::Speaking => {
                self.engine.pause(Boundary::Immediate)?;
                self.set_state(PlaybackState::Paused);
                Ok(())
            }
            PlaybackState::Idle | PlaybackState::Starting | PlaybackState::Paused => {
                tracing::debug!(state = ?self.state, "Pause ignored");
                Ok(())
            }
        }
    }

    /// Stop the in-flight utterance at the immediate boundary.
    ///
    /// The state does not change here: the engine confirms via a
    /// [`SynthEvent::Cancelled`] (or `Finished`) callback, which is what
    /// returns the machine to Idle. Stop while already Idle is a no-op.
    pub fn stop(&mut self) -> Result<(), SpeechError> {
        match self.state {
            PlaybackState::Starting | PlaybackState::Speaking | PlaybackState::Paused => {
                self.engine.stop(Boundary::Immediate)
            }
            PlaybackState::Idle => {
                tracing::debug!("Stop ignored: nothing in flight");
                Ok(())
            }
        }
    }

    /// Replace the text buffer with the placeholder.
    ///
    /// Only honoured while Idle — the clear control is disabled in every
    /// other state.
    pub fn clear(&mut self) {
        if self.state != PlaybackState::Idle {
            tracing::debug!(state = ?self.state, "Clear ignored");
            return;
        }
        self.text = PLACEHOLDER_TEXT.to_string();
        self.emit(ControllerEvent::TextReplaced(self.text.clone()));
    }

    /// Replace the text buffer with edited contents.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Record a new rate slider value.
    ///
    /// The slider owns clamping; the value is stored as handed over and
    /// read at the next play, never applied to a running utterance.
    pub fn set_rate(&mut self, rate: f32) {
        tracing::debug!(rate, "Rate slider changed");
        self.params.rate = rate;
    }

    /// Record a new pitch slider value. Same contract as [`set_rate`](Self::set_rate).
    pub fn set_pitch(&mut self, pitch: f32) {
        tracing::debug!(pitch, "Pitch slider changed");
        self.params.pitch = pitch;
    }

    // ── External triggers ──────────────────────────────────────────

    /// The audio route changed (e.g. headphones unplugged): cut playback.
    ///
    /// Delegates to [`stop`](Self::stop), so it is a no-op while Idle and
    /// never touches pause/resume.
    pub fn audio_route_changed(&mut self) -> Result<(), SpeechError> {
        tracing::info!(state = ?self.state, "Audio route changed");
        self.stop()
    }

    // ── Engine callbacks ───────────────────────────────────────────

    /// Apply an engine lifecycle event.
    ///
    /// Events carrying an id other than the in-flight utterance are stale
    /// (the controller already abandoned that utterance) and are dropped.
    pub fn handle_synth_event(&mut self, event: SynthEvent) {
        match event {
            SynthEvent::Started(id) => {
                if !self.owns(id) {
                    return;
                }
                if self.state == PlaybackState::Starting {
                    self.set_state(PlaybackState::Speaking);
                    self.emit(ControllerEvent::SpeechStarted);
                }
            }
            SynthEvent::Finished(id) => {
                if !self.owns(id) {
                    return;
                }
                self.in_flight = None;
                self.set_state(PlaybackState::Idle);
                self.emit(ControllerEvent::SpeechFinished);
            }
            SynthEvent::Cancelled(id) => {
                if !self.owns(id) {
                    return;
                }
                self.in_flight = None;
                self.set_state(PlaybackState::Idle);
                self.emit(ControllerEvent::SpeechCancelled);
            }
        }
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn allocate_utterance_id(&mut self) -> UtteranceId {
        let id = UtteranceId(self.next_utterance);
        self.next_utterance += 1;
        id
    }

    /// Whether a callback belongs to the utterance currently in flight.
    fn owns(&self, id: UtteranceId) -> bool {
        if self.in_flight == Some(id) {
            true
        } else {
            tracing::debug!(?id, in_flight = ?self.in_flight, "Stale engine event dropped");
            false
        }
    }

    /// Transition to a new state, recompute flags, and emit both.
    fn set_state(&mut self, new_state: PlaybackState) {
        if self.state != new_state {
            tracing::debug!(old = ?self.state, new = ?new_state, "Playback state transition");
            self.state = new_state;
            self.emit(ControllerEvent::StateChanged(new_state));
            self.emit(ControllerEvent::Affordances(AffordanceFlags::for_state(
                new_state,
            )));
        }
    }

    /// Emit a controller event (best-effort — if the receiver is dropped,
    /// log and move on).
    fn emit(&self, event: ControllerEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::warn!("Controller event receiver dropped");
        }
    }
}
