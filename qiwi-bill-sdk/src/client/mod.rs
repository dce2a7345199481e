//! HTTP client for the bills API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod bills;
mod transport;

pub use bills::BillPaymentsClient;
pub use transport::{HttpTransport, TransportError, TransportRequest, TransportResponse};

use crate::objects::ErrorResponse;

/// Errors produced by [`BillPaymentsClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not complete (DNS, TLS, connection reset, …).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-200 status and an error body.
    #[error("api error: {0}")]
    Api(ErrorResponse),

    /// A request or response body did not match the expected JSON shape.
    #[error("json error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The secret key contains characters not allowed in a header value.
    #[error("secret key is not a valid header value")]
    InvalidSecretKey,

    /// A bill or refund id is empty or a dot segment (`.`, `..`).
    #[error("invalid bill or refund id: {0:?}")]
    InvalidId(String),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// The error reported by the API, if that is what this is.
    pub fn api_error(&self) -> Option<&ErrorResponse> {
        match self {
            ClientError::Api(error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Transport(error.into())
    }
}
