//! Error types for voice-effect processing.
//!
//! Everything that can go wrong while handling a button press is a `BotError`
//! variant; the callback handler is the single place that turns these into a
//! user-visible message.

/// The main error type for effect-processing operations.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Catalog lookup with a key outside the fixed effect set. Valid
    /// payloads never produce this; it indicates payload tampering or an
    /// encode/catalog mismatch.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// Callback payload did not decode into `<message_id>:<effect_key>`.
    #[error("malformed callback token: {0:?}")]
    MalformedToken(String),

    /// The source message the token points at can no longer be retrieved
    /// (deleted, too old, or the menu message lost its reply context).
    #[error("source message unavailable")]
    MessageUnavailable,

    /// The resolved source message carries no voice payload.
    #[error("message has no voice payload")]
    NotVoiceMessage,

    /// The external transform engine failed: non-zero exit, missing output,
    /// or timeout.
    #[error("transform failed: {0}")]
    Transform(String),

    /// An outbound Telegram call failed.
    #[error("telegram request failed: {0}")]
    Platform(#[from] teloxide::RequestError),

    /// Downloading a voice file from Telegram failed.
    #[error("file download failed: {0}")]
    Download(#[from] teloxide::DownloadError),

    /// Local filesystem error while staging audio for the engine.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for effect-processing operations.
pub type Result<T> = std::result::Result<T, BotError>;
