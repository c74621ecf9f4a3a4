//
//  esclient
//  api/options.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The per-request options bag.
//!
//! Options travel next to the [`RequestDescriptor`](super::RequestDescriptor)
//! and tell the transport how to execute it: which status codes are not
//! errors, how long to wait, how often to retry, extra headers, and the
//! warnings gathered while building the request.
//!
//! Options can be assembled with the typed builder methods or converted from
//! JSON (the shape used by the CLI `--options` flag), in which case they are
//! validated and a malformed `headers` value is rejected as a configuration
//! error.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::ApiError;
use super::request::scalar_to_string;

/// Options bag for a single request.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use esclient::api::RequestOptions;
///
/// let options = RequestOptions::new()
///     .ignore(404)
///     .request_timeout(Duration::from_secs(5))
///     .header("x-opaque-id", "reindex-job");
///
/// assert_eq!(options.ignore, Some(vec![404]));
/// assert_eq!(options.headers.as_ref().map(|h| h.len()), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestOptions {
    /// Status codes that should be treated as success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Vec<u16>>,

    /// Per-request timeout, overriding the transport default.
    #[serde(skip_serializing_if = "Option::is_none", with = "duration_millis")]
    pub request_timeout: Option<Duration>,

    /// Maximum number of retries the transport may attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,

    /// Extra request headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    /// Advisory messages collected while building the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,

    /// Return the full response (status, headers, warnings, meta) instead of
    /// only the body.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub meta: bool,
}

impl RequestOptions {
    /// Creates an empty options bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a status code to the ignore list.
    pub fn ignore(mut self, status: u16) -> Self {
        self.ignore.get_or_insert_with(Vec::new).push(status);
        self
    }

    /// Sets the request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the retry budget.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Adds a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Requests the full response with metadata.
    pub fn meta(mut self, meta: bool) -> Self {
        self.meta = meta;
        self
    }

    /// Appends warnings produced while building the request.
    ///
    /// Existing warnings are kept; `None` leaves the bag untouched.
    pub fn push_warnings(&mut self, warnings: Option<Vec<String>>) {
        if let Some(new) = warnings {
            self.warnings.get_or_insert_with(Vec::new).extend(new);
        }
    }

    /// Returns `true` if `status` is in the ignore list.
    pub fn ignores(&self, status: u16) -> bool {
        self.ignore
            .as_ref()
            .is_some_and(|codes| codes.contains(&status))
    }
}

impl TryFrom<Value> for RequestOptions {
    type Error = ApiError;

    /// Converts a JSON options object, validating every known key.
    ///
    /// Accepted keys (camelCase or snake_case): `ignore` (number or list),
    /// `requestTimeout` (milliseconds), `maxRetries`, `headers` (object),
    /// `warnings` (list of strings) and `meta` (boolean). Unknown keys are
    /// skipped.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            other => {
                return Err(ApiError::configuration(format!(
                    "Options should be an object, instead got: {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut options = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "ignore" => options.ignore = parse_ignore(&value)?,
                "requestTimeout" | "request_timeout" => {
                    options.request_timeout = match value {
                        Value::Null => None,
                        ref v => Some(Duration::from_millis(v.as_u64().ok_or_else(|| {
                            ApiError::configuration(
                                "requestTimeout should be a number of milliseconds",
                            )
                        })?)),
                    }
                }
                "maxRetries" | "max_retries" => {
                    options.max_retries = match value {
                        Value::Null => None,
                        ref v => Some(
                            v.as_u64()
                                .and_then(|n| u32::try_from(n).ok())
                                .ok_or_else(|| {
                                    ApiError::configuration("maxRetries should be a positive integer")
                                })?,
                        ),
                    }
                }
                "headers" => options.headers = parse_headers(value)?,
                "warnings" => {
                    options.warnings = match value {
                        Value::Array(items) => {
                            Some(items.iter().filter_map(scalar_to_string).collect())
                        }
                        _ => None,
                    }
                }
                "meta" => options.meta = value.as_bool().unwrap_or(false),
                other => tracing::debug!(option = other, "ignoring unknown request option"),
            }
        }

        Ok(options)
    }
}

/// `ignore` accepts a single status code or a list of them.
fn parse_ignore(value: &Value) -> Result<Option<Vec<u16>>, ApiError> {
    let as_status = |v: &Value| v.as_u64().and_then(|n| u16::try_from(n).ok());
    let invalid = || ApiError::configuration("ignore should be a status code or a list of status codes");

    match value {
        Value::Null => Ok(None),
        Value::Number(_) => Ok(Some(vec![as_status(value).ok_or_else(invalid)?])),
        Value::Array(items) => items
            .iter()
            .map(|item| as_status(item).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        _ => Err(invalid()),
    }
}

fn parse_headers(value: Value) -> Result<Option<BTreeMap<String, String>>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(headers_from_map(map))),
        other => Err(ApiError::configuration(format!(
            "Headers should be an object, instead got: {}",
            json_type_name(&other)
        ))),
    }
}

fn headers_from_map(map: Map<String, Value>) -> BTreeMap<String, String> {
    map.into_iter()
        .filter_map(|(name, value)| scalar_to_string(&value).map(|v| (name, v)))
        .collect()
}

/// Name of a JSON value's type, as reported in configuration errors.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_u64(d.as_millis() as u64),
            None => serializer.serialize_none(),
        }
    }
}
