use thiserror::Error;

/// Errors that can occur when encoding or decoding channel messages.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The message bytes were not valid JSON.
    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The message was JSON but not a method call.
    #[error("Malformed method call: {0}")]
    MalformedCall(String),

    /// The reply was JSON but not a result envelope.
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),
}
