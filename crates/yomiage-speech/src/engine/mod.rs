//! Speech engine seam — engine-agnostic interface for utterance synthesis.
//!
//! This module defines the [`SpeechSynthesizer`] trait that abstracts over
//! concrete speech engines. The
//! [`PlaybackController`](crate::controller::PlaybackController) operates on
//! a trait object (`Box<dyn SpeechSynthesizer>`) so that engines can be
//! swapped without touching the state machine.
//!
//! Every request is fire-and-forget: `speak`/`pause`/`resume`/`stop` return
//! as soon as the engine has accepted the request, and completion is
//! observed only through [`SynthEvent`]s the engine delivers back to the
//! controller's event loop. In particular, cancellation is `stop` followed
//! eventually by [`SynthEvent::Cancelled`], never a synchronous outcome.

#[cfg(feature = "platform")]
pub mod platform;

use yomiage_core::domain::{Utterance, UtteranceId};

use crate::error::SpeechError;

/// Where in the utterance a pause or stop takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Cut playback without waiting for the end of the current word.
    Immediate,
}

/// Lifecycle callbacks delivered by an engine.
///
/// Each event names the utterance it belongs to; the controller discards
/// events from utterances it no longer owns. Engines must deliver events to
/// the same serialized path that handles user actions — the controller does
/// no locking of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthEvent {
    /// The engine began reading the utterance aloud.
    Started(UtteranceId),

    /// The engine read the utterance to its natural end.
    Finished(UtteranceId),

    /// The utterance was cut short by a stop request.
    Cancelled(UtteranceId),
}

/// Engine-agnostic speech synthesizer.
///
/// Implementations must be `Send + Sync` so the controller can live behind
/// a `tokio::sync::RwLock` shared with bridge tasks.
///
/// Engines own at most one utterance at a time; the controller never issues
/// a second `speak` while one is in flight.
pub trait SpeechSynthesizer: Send + Sync {
    /// Submit an utterance for synthesis.
    ///
    /// Ownership of the utterance content transfers to the engine; a
    /// [`SynthEvent::Started`] confirms playback actually began.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Suspend the in-flight utterance.
    fn pause(&mut self, boundary: Boundary) -> Result<(), SpeechError>;

    /// Continue a paused utterance from where it stopped.
    fn resume(&mut self) -> Result<(), SpeechError>;

    /// Abandon the in-flight utterance.
    ///
    /// Completion is observed via [`SynthEvent::Cancelled`] (or
    /// [`SynthEvent::Finished`] if the utterance raced to its end).
    fn stop(&mut self, boundary: Boundary) -> Result<(), SpeechError>;
}
