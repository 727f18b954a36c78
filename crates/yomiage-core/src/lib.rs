#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    AffordanceFlags, FIXED_VOLUME, PITCH_RANGE, PLACEHOLDER_TEXT, PlaybackState, RATE_RANGE,
    SpeechParams, Utterance, UtteranceId,
};
pub use events::AppEvent;
pub use ports::{AppEventEmitter, NoopEmitter, PlaybackPort, PlaybackPortError, PlaybackStatusDto};
