//! Async client for the MKS v1 managed-Kubernetes API.
//!
//! # Overview
//! Every call goes through one `ServiceClient` that attaches the auth token
//! and user agent, runs the request under a caller-supplied
//! `RequestContext`, and turns the response into a `ResponseResult` with a
//! normalized `ApiError` for non-2xx statuses. Resource modules (`cluster`,
//! `nodegroup`, `node`, `task`, `kubeversion`, `kubeoptions`) are thin free
//! functions on top.
//!
//! # Design
//! - Request construction and response classification are plain data
//!   (`HttpRequest` in, `HttpResponse` out), so a host with its own HTTP stack
//!   can skip `do_request` and still use the rest of the crate.
//! - Enumerated strings (statuses, task types, taint effects) decode into
//!   closed enums with an `Unknown` arm; a new value from the server never
//!   fails a decode.
//! - Resource callers return the `ResponseResult` alongside the decoded
//!   value, and embed it in `Error` when the status or body was bad.

pub mod client;
pub mod cluster;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod kubeoptions;
pub mod kubeversion;
pub mod node;
pub mod nodegroup;
pub mod result;
pub mod task;
mod wire;

pub use client::{ServiceClient, AUTH_TOKEN_HEADER, DEFAULT_USER_AGENT};
pub use config::{ClientConfig, ConfigError, SecretToken};
pub use context::RequestContext;
pub use error::{ApiError, Error, ExtractError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use result::ResponseResult;
