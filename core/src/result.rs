//! Response classification and the result envelope handed to every caller.
//!
//! # Design
//! `classify` runs once, when the `ResponseResult` is built, and its outcome
//! is never changed afterwards. Only the 404 body shape is fixed by status
//! code; every other non-2xx response is classified by what its body looks
//! like, so the API can add error statuses without this module learning
//! about them.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ApiError, ExtractError};
use crate::http::HttpResponse;

#[derive(Deserialize)]
struct ErrorEnvelope<T> {
    error: T,
}

#[derive(Deserialize)]
struct NotFoundBody {
    id: String,
    message: String,
}

#[derive(Deserialize)]
struct GenericBody {
    message: String,
}

/// Buckets a status code and body into success (`None`) or one of the
/// `ApiError` classifications. Never fails.
pub fn classify(status: u16, body: &[u8]) -> Option<ApiError> {
    if (200..300).contains(&status) {
        return None;
    }

    let structured = if status == 404 {
        serde_json::from_slice::<ErrorEnvelope<NotFoundBody>>(body)
            .ok()
            .map(|envelope| ApiError::NotFound {
                id: envelope.error.id,
                message: envelope.error.message,
            })
    } else {
        serde_json::from_slice::<ErrorEnvelope<GenericBody>>(body)
            .ok()
            .map(|envelope| ApiError::Generic {
                message: envelope.error.message,
            })
    };

    Some(structured.unwrap_or(ApiError::Opaque { status }))
}

/// Outcome of one request that reached the server.
///
/// The body can be read out once, through either `extract_result` or
/// `extract_raw`. Check `err` first: a failed response still has a body, but
/// it is an error envelope rather than the payload the caller wants.
#[derive(Debug)]
pub struct ResponseResult {
    status_code: u16,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
    err: Option<ApiError>,
}

impl ResponseResult {
    pub fn from_response(response: HttpResponse) -> Self {
        let err = classify(response.status, &response.body);
        debug!(
            status = response.status,
            error = err.as_ref().map(tracing::field::display),
            "classified response"
        );
        Self {
            status_code: response.status,
            headers: response.headers,
            body: Some(response.body),
            err,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The classification error, or `None` if the status was 2xx.
    pub fn err(&self) -> Option<&ApiError> {
        self.err.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.err.is_none()
    }

    /// Whether the body is still available for extraction.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Decodes the body as JSON into `T`.
    pub fn extract_result<T: DeserializeOwned>(&mut self) -> Result<T, ExtractError> {
        let body = self.take_body()?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Returns the body bytes without interpreting them.
    pub fn extract_raw(&mut self) -> Result<Bytes, ExtractError> {
        self.take_body()
    }

    fn take_body(&mut self) -> Result<Bytes, ExtractError> {
        self.body.take().ok_or(ExtractError::BodyConsumed)
    }
}
