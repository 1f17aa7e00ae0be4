use thiserror::Error;

use crate::transport::TransportError;

/// Why a fetch produced no result.
///
/// These never cross the client boundary; they exist so the cause can be logged.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("provider responded with HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("provider reported failure: {0}")]
    ProviderReported(String),
}

impl FetchError {
    pub(crate) fn malformed(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}
