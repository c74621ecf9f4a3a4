//
//  esclient
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error taxonomy for building and dispatching API requests.
//!
//! # Overview
//!
//! | Variant | Raised by | Network attempted? |
//! |---------|-----------|--------------------|
//! | `Configuration` | Request builder, options conversion, catalog lookup | Never |
//! | `Response` | Transport, for non-ignored 4xx/5xx statuses | Yes |
//! | `Network` | Transport, connection or timeout failures | Yes |
//! | `Serialization` | Transport, malformed payloads | Maybe |
//! | `Transport` | Custom transports with their own failure modes | Depends |
//!
//! Unknown query parameters are deliberately *not* errors. They are collected
//! as warnings and forwarded, see [`crate::api::querystring`].

use serde_json::Value;
use thiserror::Error;

/// Unified error type for every API operation.
///
/// Configuration errors always short-circuit before the transport is called,
/// so a caller can fix the call and retry. Everything else is produced by the
/// transport collaborator and passed through unchanged.
///
/// # Example
///
/// ```rust
/// use esclient::api::ApiError;
///
/// let err = ApiError::Configuration("Missing required parameter: id".to_string());
/// assert!(err.is_configuration());
/// assert_eq!(err.to_string(), "Configuration error: Missing required parameter: id");
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// The call itself is malformed and was rejected before any I/O.
    ///
    /// Covers missing required path parameters, a body supplied to a
    /// body-less endpoint, malformed `headers` options and unknown endpoint
    /// names.
    ///
    /// # Parameters
    ///
    /// - `0` - Human readable description naming the offending parameter
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The server answered with a status code that was not ignored.
    ///
    /// # Fields
    ///
    /// - `status` - The HTTP status code
    /// - `body` - The decoded response body (JSON when possible, string otherwise)
    #[error("Response error ({status}): {body}")]
    Response {
        /// HTTP status code returned by the server.
        status: u16,
        /// Response payload.
        body: Value,
    },

    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, timeouts and DNS resolution errors.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A payload could not be encoded or decoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Opaque failure reported by a custom transport implementation.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Shorthand for building a [`ApiError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns `true` when the error was raised before any network attempt.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns the HTTP status code carried by a response error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
