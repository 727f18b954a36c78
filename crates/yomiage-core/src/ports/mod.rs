//! Port traits and DTOs consumed by presentation adapters.

mod event_emitter;
pub mod playback;

pub use event_emitter::{AppEventEmitter, NoopEmitter};
pub use playback::{PlaybackPort, PlaybackPortError, PlaybackStatusDto};
