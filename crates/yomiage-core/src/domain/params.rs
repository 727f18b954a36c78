//! Speech parameters read by the controller at play time.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Valid range for the speech rate slider.
pub const RATE_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Valid range for the pitch slider.
pub const PITCH_RANGE: RangeInclusive<f32> = 0.5..=2.0;

/// Playback volume. Fixed — not user-adjustable in this design.
pub const FIXED_VOLUME: f32 = 1.0;

/// Parameters an utterance is synthesized with.
///
/// Rate and pitch mirror the two sliders and are clamped by the sliders
/// themselves; the controller stores whatever it is handed and reads the
/// values once, at the moment speech starts. A running utterance is never
/// re-parameterized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechParams {
    /// Speech rate in [`RATE_RANGE`].
    pub rate: f32,

    /// Pitch multiplier in [`PITCH_RANGE`].
    pub pitch: f32,

    /// Volume, always [`FIXED_VOLUME`].
    pub volume: f32,

    /// BCP-47 voice locale passed through to the engine (e.g. `"ja-JP"`).
    pub voice_locale: String,
}

impl Default for SpeechParams {
    /// Slider midpoints used by the original screen: rate 0.5, pitch 1.0.
    fn default() -> Self {
        Self {
            rate: 0.5,
            pitch: 1.0,
            volume: FIXED_VOLUME,
            voice_locale: "ja-JP".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_slider_initial_positions() {
        let params = SpeechParams::default();
        assert!((params.rate - 0.5).abs() < f32::EPSILON);
        assert!((params.pitch - 1.0).abs() < f32::EPSILON);
        assert!((params.volume - FIXED_VOLUME).abs() < f32::EPSILON);
        assert_eq!(params.voice_locale, "ja-JP");
    }

    #[test]
    fn defaults_sit_inside_declared_ranges() {
        let params = SpeechParams::default();
        assert!(RATE_RANGE.contains(&params.rate));
        assert!(PITCH_RANGE.contains(&params.pitch));
    }
}
