#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod controller;
pub mod engine;
pub mod error;
pub mod service;

// Re-export key types for convenience
pub use controller::{ControllerEvent, PlaybackController};
pub use engine::{Boundary, SpeechSynthesizer, SynthEvent};
#[cfg(feature = "platform")]
pub use engine::platform::PlatformSynthesizer;
pub use error::SpeechError;
pub use service::{PlaybackService, spawn_event_bridge};

// Silence unused dev-dependency warnings: serde_json is exercised only by
// the integration tests under tests/.
#[cfg(test)]
use serde_json as _;
