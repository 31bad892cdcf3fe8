//! Errors shared by the chat platform ports

use thiserror::Error;

/// Boxed error from the underlying transport
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure talking to the chat platform
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The request never produced a usable HTTP response
    #[error("{method}: request failed")]
    Transport {
        /// API method being called
        method: String,
        /// Underlying transport error
        #[source]
        source: BoxError,
    },

    /// The platform answered with an error code
    #[error("{method}: platform returned error {code:?}")]
    Api {
        /// API method being called
        method: String,
        /// Error code reported by the platform
        code: String,
    },

    /// The response body could not be decoded
    #[error("{method}: unexpected response")]
    Decode {
        /// API method being called
        method: String,
        /// Underlying decode error
        #[source]
        source: BoxError,
    },
}

impl PlatformError {
    /// Create a transport error for a method
    pub fn transport(method: &str, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            method: method.to_string(),
            source: source.into(),
        }
    }

    /// Create an API error for a method
    pub fn api(method: &str, code: impl Into<String>) -> Self {
        Self::Api {
            method: method.to_string(),
            code: code.into(),
        }
    }

    /// Create a decode error for a method
    pub fn decode(method: &str, source: impl Into<BoxError>) -> Self {
        Self::Decode {
            method: method.to_string(),
            source: source.into(),
        }
    }
}
