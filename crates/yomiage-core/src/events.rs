//! Canonical event union for all cross-adapter events.
//!
//! This module is the single source of truth for events flowing from the
//! playback controller to presentation layers (GUI listeners, SSE handlers,
//! test harnesses).
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "affordances_changed", "play": true, "pause": false, "stop": false, "clear": true }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{AffordanceFlags, PlaybackState};

/// Canonical event types for all adapters.
///
/// Each variant carries everything a listener needs for the event to be
/// self-describing; no variant requires a follow-up query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// The playback state machine moved to a new state.
    PlaybackStateChanged {
        /// Wire label: `"idle"`, `"speaking"`, or `"paused"`.
        state: String,
    },

    /// The enabled/disabled flags of the four controls were recomputed.
    AffordancesChanged {
        /// Play (or resume) control enabled.
        play: bool,
        /// Pause control enabled.
        pause: bool,
        /// Stop control enabled.
        stop: bool,
        /// Clear-text control enabled.
        clear: bool,
    },

    /// The engine confirmed it began reading the utterance.
    SpeechStarted,

    /// The engine finished reading the utterance to its end.
    SpeechFinished,

    /// The utterance was cut short (user stop or audio route change).
    SpeechCancelled,

    /// The text buffer was replaced (user cleared it).
    TextReplaced {
        /// The new buffer contents.
        text: String,
    },
}

impl AppEvent {
    /// Build a state-change event with the state's wire label.
    #[must_use]
    pub fn state_changed(state: PlaybackState) -> Self {
        Self::PlaybackStateChanged {
            state: state.label().to_owned(),
        }
    }

    /// Build an affordances event from derived flags.
    #[must_use]
    pub const fn affordances(flags: AffordanceFlags) -> Self {
        Self::AffordancesChanged {
            play: flags.play,
            pause: flags.pause,
            stop: flags.stop,
            clear: flags.clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = AppEvent::state_changed(PlaybackState::Paused);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "playback_state_changed");
        assert_eq!(json["state"], "paused");
    }

    #[test]
    fn affordances_event_carries_all_four_flags() {
        let event = AppEvent::affordances(AffordanceFlags::for_state(PlaybackState::Speaking));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "affordances_changed");
        assert_eq!(json["play"], false);
        assert_eq!(json["pause"], true);
        assert_eq!(json["stop"], true);
        assert_eq!(json["clear"], false);
    }

    #[test]
    fn starting_state_reports_speaking_label() {
        let event = AppEvent::state_changed(PlaybackState::Starting);
        assert_eq!(
            event,
            AppEvent::PlaybackStateChanged {
                state: "speaking".to_owned()
            }
        );
    }
}
