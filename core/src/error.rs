//! Error types for the MKS client.
//!
//! # Design
//! Failures are split by where they happen:
//!
//! - `TransportError`: the request never produced a response (network,
//!   cancellation, deadline). No `ResponseResult` exists.
//! - `ApiError`: a response arrived with a non-2xx status. This is the
//!   classification stored on `ResponseResult`.
//! - `ExtractError`: the body of a successful response could not be read
//!   into the requested shape.
//!
//! `Error` is what resource callers return. Its `Api` and `Decode` variants
//! carry the `ResponseResult` so the status code stays inspectable on failure.

use thiserror::Error;

use crate::result::ResponseResult;

/// Classification of a response whose status code was not in the 2xx range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 404 with a `{"error":{"id","message"}}` body.
    #[error("{message} (id: {id})")]
    NotFound { id: String, message: String },

    /// Any other non-2xx status with a `{"error":{"message"}}` body.
    #[error("{message}")]
    Generic { message: String },

    /// A non-2xx status whose body did not have the expected error shape.
    #[error("got the {status} status code from the server")]
    Opaque { status: u16 },
}

/// The request did not complete.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request cancelled")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Reading the body out of a `ResponseResult` failed.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("response body has already been extracted")]
    BodyConsumed,

    #[error("unable to decode response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Errors returned by resource callers.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("unable to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{error}")]
    Api {
        #[source]
        error: ApiError,
        result: Box<ResponseResult>,
    },

    #[error("{source}")]
    Decode {
        source: ExtractError,
        result: Box<ResponseResult>,
    },

    #[error("unable to find {field} field in kubeconfig")]
    KubeconfigFieldMissing {
        field: &'static str,
        result: Box<ResponseResult>,
    },

    #[error("invalid {field} field in the kubeconfig")]
    KubeconfigFieldInvalid {
        field: &'static str,
        result: Box<ResponseResult>,
    },
}

impl Error {
    /// The response that accompanied this error, if one was received.
    pub fn response_result(&self) -> Option<&ResponseResult> {
        match self {
            Error::Api { result, .. }
            | Error::Decode { result, .. }
            | Error::KubeconfigFieldMissing { result, .. }
            | Error::KubeconfigFieldInvalid { result, .. } => Some(result),
            Error::Transport(_) | Error::Encode(_) => None,
        }
    }

    pub fn into_response_result(self) -> Option<ResponseResult> {
        match self {
            Error::Api { result, .. }
            | Error::Decode { result, .. }
            | Error::KubeconfigFieldMissing { result, .. }
            | Error::KubeconfigFieldInvalid { result, .. } => Some(*result),
            Error::Transport(_) | Error::Encode(_) => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        self.response_result().map(ResponseResult::status_code)
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.api_error(), Some(ApiError::NotFound { .. }))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}
