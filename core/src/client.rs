//! Service client: request building, execution, and the caller plumbing
//! shared by every resource module.
//!
//! # Design
//! `ServiceClient` holds the endpoint, token, user agent, and a
//! `reqwest::Client`; it is never mutated after construction and is cheap to
//! clone. Calls run in three steps:
//!
//! 1. `build_request` produces a plain-data `HttpRequest` with the standard
//!    headers attached.
//! 2. `do_request` executes it once under a `RequestContext`. Anything that
//!    prevents a response from arriving is a `TransportError`.
//! 3. `ResponseResult::from_response` classifies whatever came back.
//!
//! Resource modules go through `call`/`call_empty`/`call_raw`, which apply
//! the same error order everywhere: transport, then classification, then
//! decode.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::{ClientConfig, ConfigError, SecretToken};
use crate::context::RequestContext;
use crate::error::{Error, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::result::ResponseResult;

/// Header carrying the auth token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("mks-rs/", env!("CARGO_PKG_VERSION"));

const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for one MKS v1 endpoint.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http_client: reqwest::Client,
    endpoint: String,
    token: SecretToken,
    user_agent: String,
}

impl ServiceClient {
    pub fn new(token: impl Into<SecretToken>, endpoint: &str) -> Self {
        Self::with_http_client(reqwest::Client::new(), token, endpoint)
    }

    /// Uses a caller-provided `reqwest::Client`, e.g. one with custom TLS
    /// roots, proxies, or a timeout.
    pub fn with_http_client(
        http_client: reqwest::Client,
        token: impl Into<SecretToken>,
        endpoint: &str,
    ) -> Self {
        Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let client = Self::with_http_client(http_client, config.token.clone(), &config.endpoint);
        Ok(match &config.user_agent {
            Some(user_agent) => client.with_user_agent(user_agent),
            None => client,
        })
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Joins path segments onto the endpoint with `/`.
    pub fn url(&self, segments: &[&str]) -> String {
        let mut url = self.endpoint.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    /// Builds a request carrying the JSON content type, the auth token, and
    /// the user agent.
    pub fn build_request(
        &self,
        method: HttpMethod,
        url: impl Into<String>,
        body: Option<Vec<u8>>,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: url.into(),
            headers: vec![
                ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
                (AUTH_TOKEN_HEADER.to_string(), self.token.expose().to_string()),
                ("User-Agent".to_string(), self.user_agent.clone()),
            ],
            body,
        }
    }

    /// Sends one request and classifies the response. No retries.
    ///
    /// Fails only when no response arrived; a non-2xx status is reported
    /// through `ResponseResult::err`.
    pub async fn do_request(
        &self,
        ctx: &RequestContext,
        method: HttpMethod,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ResponseResult, TransportError> {
        let request = self.build_request(method, url, body);
        debug!(method = method.as_str(), url, "sending request");

        let response = ctx.run(self.execute(request)).await?;
        Ok(ResponseResult::from_response(response))
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .http_client
            .request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    /// Sends a request and fails on any transport or classification error.
    pub(crate) async fn call_empty(
        &self,
        ctx: &RequestContext,
        method: HttpMethod,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ResponseResult, Error> {
        let result = self.do_request(ctx, method, url, body).await?;
        match result.err().cloned() {
            Some(error) => Err(Error::Api {
                error,
                result: Box::new(result),
            }),
            None => Ok(result),
        }
    }

    /// Like `call_empty`, then decodes the body into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        method: HttpMethod,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<(T, ResponseResult), Error> {
        let mut result = self.call_empty(ctx, method, url, body).await?;
        match result.extract_result::<T>() {
            Ok(value) => Ok((value, result)),
            Err(source) => Err(Error::Decode {
                source,
                result: Box::new(result),
            }),
        }
    }

    /// Like `call_empty`, then returns the body bytes as-is.
    pub(crate) async fn call_raw(
        &self,
        ctx: &RequestContext,
        method: HttpMethod,
        url: &str,
    ) -> Result<(bytes::Bytes, ResponseResult), Error> {
        let mut result = self.call_empty(ctx, method, url, None).await?;
        match result.extract_raw() {
            Ok(raw) => Ok((raw, result)),
            Err(source) => Err(Error::Decode {
                source,
                result: Box::new(result),
            }),
        }
    }
}

/// Serializes a request envelope.
pub(crate) fn encode<T: Serialize>(body: &T) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(body).map_err(Error::Encode)
}
