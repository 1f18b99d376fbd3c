use std::io;
use thiserror::Error;

use crate::common::Endpoint;

/// Error type for kvs operations.
#[derive(Error, Debug)]
pub enum KvError {
    /// IO error from binding or serving a socket.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP transport error on the client side.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request body is not a JSON object with a string `method`.
    #[error("Malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    /// Method is unknown or not accepted by the endpoint.
    #[error("Unsupported method {method:?} for {endpoint} endpoint")]
    UnsupportedMethod {
        /// The method named in the request body.
        method: String,
        /// The endpoint the request arrived on.
        endpoint: Endpoint,
    },

    /// Request body could not be read, e.g. it exceeds the size limit.
    #[error("Request body rejected: {reason}")]
    Payload {
        /// HTTP status the server answers with.
        status: u16,
        /// Why the body was rejected.
        reason: String,
    },

    /// A field required by the method is absent.
    #[error("Missing field `{0}`")]
    MissingField(&'static str),

    /// Error message reported by the server.
    #[error("{0}")]
    StringError(String),
}

impl KvError {
    /// Returns true for errors caused by a bad request body.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            KvError::MalformedBody(_)
                | KvError::UnsupportedMethod { .. }
                | KvError::MissingField(_)
        )
    }
}

/// Result type alias for kvs operations.
pub type Result<T> = std::result::Result<T, KvError>;
