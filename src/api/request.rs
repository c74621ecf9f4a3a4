//
//  esclient
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request descriptor types handed to the transport.
//!
//! A [`RequestDescriptor`] is plain data: method, percent-encoded path,
//! optional body and querystring. It is built fresh for every call and
//! consumed by the [`Transport`](super::Transport); nothing in here performs
//! I/O.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;

/// HTTP method of a request descriptor.
///
/// # Example
///
/// ```rust
/// use esclient::api::Method;
///
/// let method: Method = "post".parse().unwrap();
/// assert_eq!(method, Method::Post);
/// assert_eq!(method.to_string(), "POST");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Safe read.
    Get,
    /// Write or read with a payload.
    Post,
    /// Idempotent create/replace.
    Put,
    /// Removal.
    Delete,
    /// Existence check, no response body.
    Head,
}

impl Method {
    /// Returns the upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            _ => Err(ApiError::configuration(format!("Invalid method: {}", s))),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
        }
    }
}

/// Payload of a request.
///
/// Serialization to bytes is the transport's job; the builder only decides
/// which shape the payload has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RequestBody {
    /// A single JSON document.
    Json(Value),
    /// Newline-delimited JSON documents (`bulk`, `msearch`).
    Bulk(Vec<Value>),
}

impl RequestBody {
    /// Returns the `Content-Type` the payload should be sent with.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Bulk(_) => "application/x-ndjson",
        }
    }

    /// Encodes the payload as the bytes the server expects.
    ///
    /// Bulk payloads are one compact JSON document per line, each line
    /// terminated by `\n`. Strings inside a bulk payload are taken verbatim,
    /// so pre-serialized lines pass through untouched.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ApiError> {
        match self {
            Self::Json(value) => Ok(serde_json::to_vec(value)?),
            Self::Bulk(lines) => {
                let mut out = Vec::new();
                for line in lines {
                    match line {
                        Value::String(raw) => out.extend_from_slice(raw.as_bytes()),
                        other => serde_json::to_writer(&mut out, other)?,
                    }
                    out.push(b'\n');
                }
                Ok(out)
            }
        }
    }
}

/// A single querystring value.
///
/// Lists are kept as lists; joining them (`a,b`) is left to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// One scalar value.
    Single(String),
    /// Several values for the same key.
    List(Vec<String>),
}

impl QueryValue {
    /// Converts a JSON parameter value into its querystring form.
    ///
    /// Returns `None` for `null`, which is treated as "not supplied".
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Single(s.clone())),
            Value::Bool(b) => Some(Self::Single(b.to_string())),
            Value::Number(n) => Some(Self::Single(n.to_string())),
            Value::Array(items) => Some(Self::List(
                items.iter().filter_map(scalar_to_string).collect(),
            )),
            Value::Object(_) => Some(Self::Single(value.to_string())),
        }
    }

    /// Renders the value the way it travels on the wire.
    pub fn to_wire(&self) -> String {
        match self {
            Self::Single(s) => s.clone(),
            Self::List(items) => items.join(","),
        }
    }
}

/// Stringifies a scalar; `null` yields `None`, containers are JSON-encoded.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Fully built request, ready for the transport.
///
/// # Invariants
///
/// - `path` starts with `/` and every user-supplied segment is percent-encoded
/// - `method` is always set
///
/// # Example
///
/// ```rust
/// use esclient::api::{Method, RequestDescriptor};
///
/// let request = RequestDescriptor::new(Method::Get, "/_count");
/// assert!(request.body.is_none());
/// assert!(request.querystring.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Percent-encoded path, relative to the node URL.
    pub path: String,
    /// Optional payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    /// Canonical (snake_case) querystring.
    #[serde(default)]
    pub querystring: BTreeMap<String, QueryValue>,
}

impl RequestDescriptor {
    /// Creates a descriptor with no body and an empty querystring.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            querystring: BTreeMap::new(),
        }
    }

    /// Returns the querystring as wire pairs, lists joined with `,`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.querystring
            .iter()
            .map(|(k, v)| (k.clone(), v.to_wire()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parse_case_insensitive() {
        assert_eq!("delete".parse::<Method>().unwrap(), Method::Delete);
        assert_eq!("Head".parse::<Method>().unwrap(), Method::Head);
    }

    #[test]
    fn test_method_parse_invalid() {
        let err = "PATCH".parse::<Method>().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Invalid method: PATCH"));
    }

    #[test]
    fn test_query_value_from_json() {
        assert_eq!(QueryValue::from_json(&json!(null)), None);
        assert_eq!(
            QueryValue::from_json(&json!(10)),
            Some(QueryValue::Single("10".to_string()))
        );
        assert_eq!(
            QueryValue::from_json(&json!(true)),
            Some(QueryValue::Single("true".to_string()))
        );
        assert_eq!(
            QueryValue::from_json(&json!(["a", "b"])),
            Some(QueryValue::List(vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[test]
    fn test_query_pairs_join_lists() {
        let mut request = RequestDescriptor::new(Method::Get, "/_search");
        request.querystring.insert(
            "filter_path".to_string(),
            QueryValue::List(vec!["hits.hits._id".to_string(), "took".to_string()]),
        );
        assert_eq!(
            request.query_pairs(),
            vec![("filter_path".to_string(), "hits.hits._id,took".to_string())]
        );
    }

    #[test]
    fn test_bulk_body_is_newline_delimited() {
        let body = RequestBody::Bulk(vec![
            json!({"index": {"_index": "logs"}}),
            json!({"message": "hello"}),
        ]);
        let bytes = body.to_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "{\"index\":{\"_index\":\"logs\"}}\n{\"message\":\"hello\"}\n");
        assert_eq!(body.content_type(), "application/x-ndjson");
    }

    #[test]
    fn test_descriptor_serializes_upper_case_method() {
        let request = RequestDescriptor::new(Method::Post, "/_count");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["method"], "POST");
        assert!(value.get("body").is_none());
    }
}
