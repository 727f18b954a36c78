//! Platform speech engine backed by the cross-platform `tts` crate
//! (AVFoundation on macOS/iOS, SAPI on Windows, Speech Dispatcher on Linux).
//!
//! The crate's utterance callbacks are bridged onto an unbounded channel of
//! [`SynthEvent`]s; feed the receiver to
//! [`PlaybackService::spawn_synth_bridge`](crate::service::PlaybackService::spawn_synth_bridge)
//! so callbacks arrive on the same serialized path as user actions.
//!
//! The `tts` crate exposes no pause/resume across platforms, so
//! [`SpeechSynthesizer::pause`] and [`SpeechSynthesizer::resume`] report
//! [`SpeechError::Unsupported`] here. A platform-specific engine (e.g. one
//! binding `AVSpeechSynthesizer` directly) can implement them fully.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tts::Tts;

use yomiage_core::domain::{Utterance, UtteranceId};

use crate::engine::{Boundary, SpeechSynthesizer, SynthEvent};
use crate::error::SpeechError;

/// State shared with the `tts` crate's callback closures.
///
/// The engine owns at most one utterance at a time, so a single slot with
/// the in-flight id is enough to translate anonymous engine callbacks into
/// id-carrying [`SynthEvent`]s.
struct Shared {
    current: Mutex<Option<UtteranceId>>,
    event_tx: mpsc::UnboundedSender<SynthEvent>,
}

impl Shared {
    /// Forward an engine callback as `make(id)` for the in-flight id.
    ///
    /// `terminal` clears the slot so stale callbacks after finish/stop are
    /// dropped rather than re-reported.
    fn forward(&self, terminal: bool, make: impl Fn(UtteranceId) -> SynthEvent) {
        let mut slot = self.current.lock().unwrap();
        if let Some(id) = *slot {
            if terminal {
                *slot = None;
            }
            let _ = self.event_tx.send(make(id));
        }
    }
}

/// Mutable engine state behind one lock: the `tts` handle plus the locale
/// last applied to it, so voices are re-resolved only when the locale
/// actually changes.
struct Inner {
    tts: Tts,
    applied_locale: Option<String>,
}

/// [`SpeechSynthesizer`] over the platform's built-in speech service.
pub struct PlatformSynthesizer {
    inner: Mutex<Inner>,
    shared: Arc<Shared>,
}

impl PlatformSynthesizer {
    /// Open the platform speech service and wire up lifecycle callbacks.
    ///
    /// Returns the engine and the receiver carrying its [`SynthEvent`]s.
    pub fn new() -> Result<(Self, mpsc::UnboundedReceiver<SynthEvent>), SpeechError> {
        let mut tts = Tts::default().map_err(|e| SpeechError::EngineInit(e.to_string()))?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared {
            current: Mutex::new(None),
            event_tx,
        });

        if tts.supported_features().utterance_callbacks {
            let on_begin = Arc::clone(&shared);
            tts.on_utterance_begin(Some(Box::new(move |_| {
                on_begin.forward(false, SynthEvent::Started);
            })))
            .map_err(|e| SpeechError::EngineInit(e.to_string()))?;

            let on_end = Arc::clone(&shared);
            tts.on_utterance_end(Some(Box::new(move |_| {
                on_end.forward(true, SynthEvent::Finished);
            })))
            .map_err(|e| SpeechError::EngineInit(e.to_string()))?;

            let on_stop = Arc::clone(&shared);
            tts.on_utterance_stop(Some(Box::new(move |_| {
                on_stop.forward(true, SynthEvent::Cancelled);
            })))
            .map_err(|e| SpeechError::EngineInit(e.to_string()))?;
        } else {
            // Without callbacks the controller never leaves Starting.
            tracing::warn!("Platform speech service reports no utterance callbacks");
        }

        let engine = Self {
            inner: Mutex::new(Inner {
                tts,
                applied_locale: None,
            }),
            shared,
        };
        Ok((engine, event_rx))
    }

    /// Pick a voice matching `locale` (prefix match on the language tag).
    ///
    /// Missing voices for the requested locale are not special-cased: the
    /// engine keeps its default voice and we log the gap.
    fn apply_locale(inner: &mut Inner, locale: &str) -> Result<(), SpeechError> {
        if inner.applied_locale.as_deref() == Some(locale) {
            return Ok(());
        }
        let voices = inner
            .tts
            .voices()
            .map_err(|e| SpeechError::Engine(e.to_string()))?;
        let wanted = voices
            .iter()
            .find(|v| v.language().to_string().starts_with(locale))
            .or_else(|| {
                // Fall back to a primary-subtag match ("ja-JP" -> "ja").
                let primary = locale.split('-').next().unwrap_or(locale);
                voices
                    .iter()
                    .find(|v| v.language().to_string().starts_with(primary))
            });

        match wanted {
            Some(voice) => {
                inner
                    .tts
                    .set_voice(voice)
                    .map_err(|e| SpeechError::Engine(e.to_string()))?;
                tracing::debug!(locale, voice = %voice.name(), "Voice selected");
            }
            None => {
                tracing::warn!(locale, "No installed voice for locale, keeping engine default");
            }
        }
        inner.applied_locale = Some(locale.to_owned());
        Ok(())
    }

    /// Map the design's rate (0.0–1.0, 0.5 = normal) onto the platform
    /// range, pinning 0.5 to the platform's normal rate.
    fn platform_rate(tts: &Tts, rate: f32) -> f32 {
        if rate < 0.5 {
            lerp(tts.min_rate(), tts.normal_rate(), rate / 0.5)
        } else {
            lerp(tts.normal_rate(), tts.max_rate(), (rate - 0.5) / 0.5)
        }
    }

    /// Map the design's pitch (0.5–2.0, 1.0 = normal) onto the platform
    /// range, pinning 1.0 to the platform's normal pitch.
    fn platform_pitch(tts: &Tts, pitch: f32) -> f32 {
        if pitch < 1.0 {
            lerp(tts.min_pitch(), tts.normal_pitch(), (pitch - 0.5) / 0.5)
        } else {
            lerp(tts.normal_pitch(), tts.max_pitch(), (pitch - 1.0) / 1.0)
        }
    }
}

impl SpeechSynthesizer for PlatformSynthesizer {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        let mut inner = self.inner.lock().unwrap();

        Self::apply_locale(&mut inner, &utterance.params.voice_locale)?;

        let rate = Self::platform_rate(&inner.tts, utterance.params.rate);
        let pitch = Self::platform_pitch(&inner.tts, utterance.params.pitch);
        // Design fixes volume at full scale.
        let volume = inner.tts.max_volume();

        inner
            .tts
            .set_rate(rate)
            .map_err(|e| SpeechError::Engine(e.to_string()))?;
        inner
            .tts
            .set_pitch(pitch)
            .map_err(|e| SpeechError::Engine(e.to_string()))?;
        inner
            .tts
            .set_volume(volume)
            .map_err(|e| SpeechError::Engine(e.to_string()))?;

        *self.shared.current.lock().unwrap() = Some(utterance.id);
        if let Err(e) = inner.tts.speak(utterance.text.clone(), true) {
            *self.shared.current.lock().unwrap() = None;
            return Err(SpeechError::Engine(e.to_string()));
        }
        tracing::debug!(id = ?utterance.id, rate, pitch, "Utterance submitted");
        Ok(())
    }

    fn pause(&mut self, _boundary: Boundary) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported("pause"))
    }

    fn resume(&mut self) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported("resume"))
    }

    fn stop(&mut self, _boundary: Boundary) -> Result<(), SpeechError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .tts
            .stop()
            .map_err(|e| SpeechError::Engine(e.to_string()))?;
        Ok(())
    }
}

/// Linear interpolation with `t` in 0.0–1.0.
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    (to - from).mul_add(t, from)
}
