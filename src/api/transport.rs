//
//  esclient
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The transport collaborator contract.
//!
//! The dispatcher never talks HTTP itself. It hands each
//! [`RequestDescriptor`] and [`RequestOptions`] to a [`Transport`], which
//! owns host selection, retries, timeouts and byte-level I/O, and returns a
//! [`TransportResult`]. [`HttpTransport`](super::HttpTransport) is the
//! bundled single-node implementation; tests and embedders supply their own.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use super::options::RequestOptions;
use super::request::{Method, RequestDescriptor};

/// Executes request descriptors.
///
/// Implementations must be shareable across tasks; the dispatcher holds them
/// behind an `Arc` and may call `request` concurrently.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use esclient::api::{ApiError, RequestDescriptor, RequestOptions, Transport, TransportResult};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Transport for Echo {
///     async fn request(
///         &self,
///         request: RequestDescriptor,
///         _options: RequestOptions,
///     ) -> Result<TransportResult, ApiError> {
///         Ok(TransportResult::new(200, serde_json::json!({ "path": request.path })))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one request.
    async fn request(
        &self,
        request: RequestDescriptor,
        options: RequestOptions,
    ) -> Result<TransportResult, ApiError>;
}

/// Execution details attached to a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseMeta {
    /// Number of attempts made, including the successful one.
    pub attempts: u32,
    /// Method that was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    /// Path that was requested.
    pub path: String,
}

/// Full response as returned by a transport.
///
/// The default value (null body, status 0, no headers) is the result shape
/// reported alongside an error to callback-style callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransportResult {
    /// Decoded response body.
    pub body: Value,
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers, lower-cased names.
    pub headers: BTreeMap<String, String>,
    /// Client-side and server-side warnings.
    pub warnings: Option<Vec<String>>,
    /// Execution details.
    pub meta: ResponseMeta,
}

impl TransportResult {
    /// Creates a result with a status and body and empty metadata.
    pub fn new(status_code: u16, body: Value) -> Self {
        Self {
            body,
            status_code,
            ..Self::default()
        }
    }
}
