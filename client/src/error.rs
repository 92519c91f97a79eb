//! Client-side error taxonomy

use thiserror::Error;

/// Errors surfaced by the API client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Not logged in, or the session could not be silently renewed
    #[error("Not authenticated")]
    Unauthenticated,

    /// The server rejected the request
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// A payload could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
