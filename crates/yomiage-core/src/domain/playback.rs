//! Playback state machine types and affordance derivation.

use serde::{Deserialize, Serialize};

use super::SpeechParams;

/// Text restored into the input buffer when the user clears it.
pub const PLACEHOLDER_TEXT: &str = "喋らせたい内容を入力してください。";

/// Current state of the playback controller.
///
/// `Starting` is the optimistic window between issuing a speak request and
/// observing the engine's start callback. Externally it reports as
/// `"speaking"` (see [`PlaybackState::label`]); internally it is a distinct
/// variant so that [`AffordanceFlags`] stay a pure function of state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing in flight — the play and clear controls are available.
    Idle,

    /// Speak requested; the engine has not yet confirmed it started.
    Starting,

    /// The engine is reading the utterance aloud.
    Speaking,

    /// Playback suspended mid-utterance; resumable.
    Paused,
}

impl PlaybackState {
    /// Wire label for status DTOs and events.
    ///
    /// `Starting` is deliberately reported as `"speaking"` — the optimistic
    /// refinement is an internal detail of affordance derivation.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Starting | Self::Speaking => "speaking",
            Self::Paused => "paused",
        }
    }
}

/// Monotonically increasing identifier for one submitted utterance.
///
/// Lifecycle callbacks carry the id they belong to, letting the controller
/// discard events from an utterance it has already abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtteranceId(pub u64);

/// One discrete unit of text submitted for synthesis.
///
/// The parameter snapshot is taken when the user presses play; ownership
/// passes to the engine and the controller never mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Identifier echoed back by engine lifecycle callbacks.
    pub id: UtteranceId,

    /// The text to read aloud.
    pub text: String,

    /// Rate/pitch/volume/locale frozen at submission time.
    pub params: SpeechParams,
}

/// Enabled/disabled presentation state of the four controls.
///
/// Never set field-by-field: every instance comes from
/// [`AffordanceFlags::for_state`], so the flags cannot drift out of sync
/// with the state machine the way free-floating booleans can.
// The four bools are the four controls' enabled flags with clear,
// independent meanings; no enum grouping would improve clarity.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordanceFlags {
    /// Play (or resume) control.
    pub play: bool,
    /// Pause control.
    pub pause: bool,
    /// Stop control.
    pub stop: bool,
    /// Clear-text control.
    pub clear: bool,
}

impl AffordanceFlags {
    /// Derive the control flags for a playback state.
    ///
    /// While `Starting`, everything is disabled: play/clear went dark when
    /// the request was issued, and pause/stop light up only once the engine
    /// confirms speech actually began.
    #[must_use]
    pub const fn for_state(state: PlaybackState) -> Self {
        match state {
            PlaybackState::Idle => Self {
                play: true,
                pause: false,
                stop: false,
                clear: true,
            },
            PlaybackState::Starting => Self {
                play: false,
                pause: false,
                stop: false,
                clear: false,
            },
            PlaybackState::Speaking => Self {
                play: false,
                pause: true,
                stop: true,
                clear: false,
            },
            PlaybackState::Paused => Self {
                play: true,
                pause: false,
                stop: true,
                clear: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_enables_only_play_and_clear() {
        let flags = AffordanceFlags::for_state(PlaybackState::Idle);
        assert!(flags.play);
        assert!(!flags.pause);
        assert!(!flags.stop);
        assert!(flags.clear);
    }

    #[test]
    fn starting_disables_everything() {
        let flags = AffordanceFlags::for_state(PlaybackState::Starting);
        assert_eq!(
            flags,
            AffordanceFlags {
                play: false,
                pause: false,
                stop: false,
                clear: false
            }
        );
    }

    #[test]
    fn speaking_enables_pause_and_stop() {
        let flags = AffordanceFlags::for_state(PlaybackState::Speaking);
        assert!(!flags.play);
        assert!(flags.pause);
        assert!(flags.stop);
        assert!(!flags.clear);
    }

    #[test]
    fn paused_enables_resume_and_stop() {
        let flags = AffordanceFlags::for_state(PlaybackState::Paused);
        assert!(flags.play);
        assert!(!flags.pause);
        assert!(flags.stop);
        assert!(!flags.clear);
    }

    #[test]
    fn starting_reports_as_speaking_on_the_wire() {
        assert_eq!(PlaybackState::Starting.label(), "speaking");
        assert_eq!(PlaybackState::Speaking.label(), "speaking");
        assert_eq!(PlaybackState::Idle.label(), "idle");
        assert_eq!(PlaybackState::Paused.label(), "paused");
    }
}
