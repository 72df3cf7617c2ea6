//! Error types for the vault client.
//!
//! Encoding and decoding failures are kept apart from transport failures so a caller can
//! tell a bad filter or a corrupt document from a failed request.

use thiserror::Error;

/// A value in an outgoing body has no JSON representation (for example a NaN bound).
#[derive(Debug, Error)]
#[error("failed to encode request body: {0}")]
pub struct EncodingError(#[from] serde_json::Error);

/// Failure to materialize one raw search document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid standard, padded base64.
    #[error("document is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// The decoded bytes are not JSON of the requested shape.
    #[error("document payload does not match the target shape: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("authorization failed")]
    Unauthorized,

    #[error("server error")]
    ServerError,

    #[error("bad request")]
    BadRequest,

    #[error("unexpected response status {0}")]
    UnexpectedStatus(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("invalid response body: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    #[error("{0}")]
    InvalidArgument(&'static str),

    /// The API answered 2xx but reported an error in the envelope.
    #[error("api error: {0}")]
    Api(String),
}
