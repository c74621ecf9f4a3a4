//
//  esclient
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Builds request descriptors for Elasticsearch REST endpoints and hands them
//! to a transport.
//!
//! ## Architecture
//!
//! Leaves first:
//!
//! - [`params`] and [`options`]: the per-call inputs
//! - [`args`]: argument normalization and the callback handle
//! - [`querystring`]: camelCase → snake_case mapping with lenient warnings
//! - [`path`]: path templates and segment encoding
//! - [`endpoint`]: the declarative endpoint descriptor and generic builder
//! - [`catalog`]: the static table of endpoints
//! - [`transport`]: the collaborator contract, and [`http`] its reqwest implementation
//! - [`client`]: the dispatcher
//!
//! ## Usage
//!
//! ```rust,no_run
//! use esclient::api::{Client, Params, RequestOptions};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), esclient::api::ApiError> {
//! let client = Client::http("http://localhost:9200")?;
//!
//! let hits = client
//!     .call(
//!         "search",
//!         (
//!             Params::new()
//!                 .set("index", "logs-*")
//!                 .set("ignoreUnavailable", true)
//!                 .body(json!({"query": {"match": {"level": "error"}}})),
//!             RequestOptions::new().ignore(404),
//!         ),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]. Malformed calls fail with
//! `ApiError::Configuration` before any I/O; unknown query parameters are not
//! errors but warnings carried on the options bag and the response.

/// Argument normalization and callback handles.
pub mod args;

/// The static endpoint table.
pub mod catalog;

/// The request dispatcher.
pub mod client;

/// Endpoint descriptors and the generic request builder.
pub mod endpoint;

/// Error taxonomy.
pub mod error;

/// reqwest-backed single-node transport.
pub mod http;

/// Per-request options.
pub mod options;

/// Dynamic call parameters.
pub mod params;

/// Path templates and encoding.
pub mod path;

/// Querystring mapping.
pub mod querystring;

/// Request descriptor types.
pub mod request;

/// Transport collaborator contract.
pub mod transport;

pub use args::{CallArgs, RequestHandle};
pub use client::{ApiResponse, Client};
pub use endpoint::{BodyRule, BuiltRequest, Endpoint, MethodRule};
pub use error::ApiError;
pub use http::HttpTransport;
pub use options::RequestOptions;
pub use params::Params;
pub use request::{Method, QueryValue, RequestBody, RequestDescriptor};
pub use transport::{ResponseMeta, Transport, TransportResult};
