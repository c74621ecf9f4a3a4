//
//  esclient
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request dispatcher
//!
//! [`Client`] ties the layers together for one call:
//!
//! 1. normalize the arguments into [`CallArgs`]
//! 2. build the [`RequestDescriptor`] from the [`Endpoint`] descriptor
//! 3. append the collected warnings to the options bag
//! 4. forward both to the [`Transport`] exactly once
//!
//! Configuration errors from steps 1 and 2 are returned before the transport
//! is touched. Errors from the transport pass through unchanged; this layer
//! neither retries nor enforces timeouts.
//!
//! ## Calling conventions
//!
//! | Style | Method |
//! |-------|--------|
//! | `async`/`.await` | [`Client::perform`], [`Client::call`] |
//! | Callback | [`Client::perform_with_callback`], [`Client::call_with_callback`] |
//! | Build only | [`Client::prepare`], then [`Client::dispatch`] |

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::args::{CallArgs, RequestHandle};
use super::catalog;
use super::endpoint::Endpoint;
use super::error::ApiError;
use super::http::HttpTransport;
use super::options::RequestOptions;
use super::request::RequestDescriptor;
use super::transport::{Transport, TransportResult};

/// What a successful call resolves to.
///
/// Only the body by default; the full [`TransportResult`] when the options
/// bag asked for `meta`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    /// Response body only.
    Body(Value),
    /// Body, status code, headers, warnings and execution metadata.
    Full(TransportResult),
}

impl ApiResponse {
    /// Returns the response body regardless of shape.
    pub fn body(&self) -> &Value {
        match self {
            Self::Body(body) => body,
            Self::Full(result) => &result.body,
        }
    }

    /// Consumes the response, returning the body.
    pub fn into_body(self) -> Value {
        match self {
            Self::Body(body) => body,
            Self::Full(result) => result.body,
        }
    }

    /// Returns the full result when metadata was requested.
    pub fn full(&self) -> Option<&TransportResult> {
        match self {
            Self::Full(result) => Some(result),
            Self::Body(_) => None,
        }
    }
}

/// The API client.
///
/// Cheap to clone; clones share the transport. Calls hold no shared mutable
/// state, so one client can serve any number of concurrent calls.
///
/// # Example
///
/// ```rust,no_run
/// use esclient::api::{catalog, Client, Params};
///
/// # async fn example() -> Result<(), esclient::api::ApiError> {
/// let client = Client::http("http://localhost:9200")?;
///
/// let count = client
///     .perform(&catalog::COUNT, Params::new().set("index", "logs"))
///     .await?;
/// println!("{}", count.body()["count"]);
///
/// let status = client
///     .call("async_search.status", Params::new().set("id", "FmRld..."))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client over `transport`.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Creates a client over a shared transport.
    pub fn from_arc(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Creates a client over an [`HttpTransport`] for `node`.
    pub fn http(node: &str) -> Result<Self, ApiError> {
        Ok(Self::new(HttpTransport::new(node)?))
    }

    /// Returns the transport.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Builds the descriptor and options for a call without dispatching it.
    ///
    /// Warnings from the querystring mapper are appended to the options bag.
    /// No transport is involved, so this works without a client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when the call is malformed.
    pub fn prepare(
        endpoint: &Endpoint,
        args: impl Into<CallArgs>,
    ) -> Result<(RequestDescriptor, RequestOptions), ApiError> {
        let (params, mut options) = args.into().into_parts();
        let built = endpoint.build(&params)?;
        options.push_warnings(built.warnings);
        Ok((built.request, options))
    }

    /// Performs a call and awaits the result.
    ///
    /// # Parameters
    ///
    /// * `endpoint` - The endpoint descriptor, usually from [`catalog`]
    /// * `args` - `()`, [`Params`](super::Params), or `(Params, RequestOptions)`
    ///
    /// # Returns
    ///
    /// The response body, or the full [`TransportResult`] when
    /// `options.meta` is set.
    ///
    /// # Errors
    ///
    /// Configuration errors are returned without contacting the transport;
    /// every other error comes from the transport unchanged.
    pub async fn perform(
        &self,
        endpoint: &Endpoint,
        args: impl Into<CallArgs>,
    ) -> Result<ApiResponse, ApiError> {
        let (request, options) = Self::prepare(endpoint, args)?;
        self.dispatch(endpoint, request, options).await
    }

    /// Sends a request produced by [`prepare`](Self::prepare).
    ///
    /// The descriptor and options are handed to the transport unchanged.
    pub async fn dispatch(
        &self,
        endpoint: &Endpoint,
        request: RequestDescriptor,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        dispatch(self.transport.as_ref(), endpoint.name, request, options).await
    }

    /// Looks up `name` in the catalog and performs the call.
    ///
    /// # Errors
    ///
    /// Returns `Unknown API: <name>` for names the catalog does not know, and
    /// otherwise behaves like [`perform`](Self::perform).
    pub async fn call(&self, name: &str, args: impl Into<CallArgs>) -> Result<ApiResponse, ApiError> {
        let endpoint = catalog::find(name)?;
        self.perform(endpoint, args).await
    }

    /// Performs a call and delivers the outcome to `callback`.
    ///
    /// When the call is malformed the callback runs immediately, before this
    /// method returns, and the returned handle is already finished. Otherwise
    /// the request runs on a spawned task and the handle can cancel it; an
    /// aborted call never invokes the callback. An error outcome corresponds
    /// to the default result shape, [`TransportResult::default`].
    ///
    /// Must be called from within a Tokio runtime.
    pub fn perform_with_callback<F>(
        &self,
        endpoint: &'static Endpoint,
        args: impl Into<CallArgs>,
        callback: F,
    ) -> RequestHandle
    where
        F: FnOnce(Result<ApiResponse, ApiError>) + Send + 'static,
    {
        let (request, options) = match Self::prepare(endpoint, args) {
            Ok(prepared) => prepared,
            Err(err) => {
                callback(Err(err));
                return RequestHandle::finished();
            }
        };

        let transport = Arc::clone(&self.transport);
        RequestHandle::spawned(tokio::spawn(async move {
            callback(dispatch(transport.as_ref(), endpoint.name, request, options).await);
        }))
    }

    /// Callback form of [`call`](Self::call).
    pub fn call_with_callback<F>(&self, name: &str, args: impl Into<CallArgs>, callback: F) -> RequestHandle
    where
        F: FnOnce(Result<ApiResponse, ApiError>) + Send + 'static,
    {
        match catalog::find(name) {
            Ok(endpoint) => self.perform_with_callback(endpoint, args, callback),
            Err(err) => {
                callback(Err(err));
                RequestHandle::finished()
            }
        }
    }
}

async fn dispatch(
    transport: &dyn Transport,
    api: &str,
    request: RequestDescriptor,
    options: RequestOptions,
) -> Result<ApiResponse, ApiError> {
    debug!(api, method = %request.method, path = %request.path, "dispatching request");

    let meta = options.meta;
    let result = transport.request(request, options).await?;

    Ok(if meta {
        ApiResponse::Full(result)
    } else {
        ApiResponse::Body(result.body)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::params::Params;
    use serde_json::json;

    #[test]
    fn test_response_body_accessors() {
        let body = ApiResponse::Body(json!({"count": 3}));
        assert_eq!(body.body()["count"], 3);
        assert!(body.full().is_none());

        let full = ApiResponse::Full(TransportResult::new(200, json!(true)));
        assert_eq!(full.body(), &json!(true));
        assert_eq!(full.full().map(|r| r.status_code), Some(200));
        assert_eq!(full.into_body(), json!(true));
    }

    #[test]
    fn test_prepare_appends_warnings() {
        let mut earlier = RequestOptions::new();
        earlier.warnings = Some(vec!["earlier".to_string()]);

        let (request, options) = Client::prepare(
            &catalog::COUNT,
            (Params::new().set("index", "a").set("madeUp", 1), earlier),
        )
        .unwrap();

        assert_eq!(request.path, "/a/_count");
        let warnings = options.warnings.unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0], "earlier");
        assert!(warnings[1].contains("\"madeUp\""));
    }
}
