//! Playback controller error types.

/// Errors that can occur when talking to a speech synthesis engine.
///
/// The screen has no user-visible error channel; these surface to the
/// caller of the port and are logged, nothing more.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// The engine rejected a speak/pause/resume/stop request.
    #[error("Speech engine error: {0}")]
    Engine(String),

    /// The active engine does not implement this operation.
    #[error("Operation not supported by this engine: {0}")]
    Unsupported(&'static str),

    /// The engine could not be initialised (no voices installed, missing
    /// speech service).
    #[error("Failed to initialise speech engine: {0}")]
    EngineInit(String),
}
