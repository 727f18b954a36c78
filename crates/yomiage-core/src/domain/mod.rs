//! Core domain types.
//!
//! These types represent the pure playback model, independent of any
//! engine or presentation concerns.
//!
//! # Structure
//!
//! - `playback` - Playback state, affordance flags, and utterance types
//! - `params` - Speech parameters (rate, pitch, volume, voice locale)

mod params;
mod playback;

// Re-export domain types at the domain level for convenience
pub use params::{FIXED_VOLUME, PITCH_RANGE, RATE_RANGE, SpeechParams};
pub use playback::{AffordanceFlags, PLACEHOLDER_TEXT, PlaybackState, Utterance, UtteranceId};
