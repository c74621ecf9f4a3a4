//
//  esclient
//  api/params.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Dynamic request parameters.
//!
//! Every endpoint accepts the same loosely-typed parameter object: zero or
//! more path-identifying fields (`index`, `id`, `job_id`, ...), an optional
//! `body`, an optional explicit `method`, and any number of query options in
//! either camelCase or snake_case.

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::ApiError;
use super::options::json_type_name;

/// Key holding the request payload.
pub const BODY_KEY: &str = "body";

/// Key holding an explicit HTTP method override.
pub const METHOD_KEY: &str = "method";

/// The parameter object of a single call.
///
/// # Example
///
/// ```rust
/// use esclient::api::Params;
/// use serde_json::json;
///
/// let params = Params::new()
///     .set("index", "logs-2024")
///     .set("ignoreUnavailable", true)
///     .body(json!({"query": {"match_all": {}}}));
///
/// assert_eq!(params.path_value("index"), Some("logs-2024".to_string()));
/// assert!(params.has_body());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Creates an empty parameter object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters from a JSON value.
    ///
    /// `null` is treated as an empty object; any other non-object value is a
    /// configuration error.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self(map)),
            other => Err(ApiError::configuration(format!(
                "Params should be an object, instead got: {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Sets a parameter, returning `self` for chaining.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Sets the request body.
    pub fn body(self, body: impl Into<Value>) -> Self {
        self.set(BODY_KEY, body)
    }

    /// Sets an explicit HTTP method.
    pub fn method(self, method: impl Into<String>) -> Self {
        self.set(METHOD_KEY, method.into())
    }

    /// Inserts a parameter in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` when a non-null body was supplied.
    pub fn has_body(&self) -> bool {
        self.is_set(BODY_KEY)
    }

    /// Returns `true` when `key` holds a non-null value.
    pub fn is_set(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|v| !v.is_null())
    }

    /// Returns `true` when a path parameter is present under its snake_case
    /// name or its camelCase spelling.
    pub fn has_path_param(&self, snake: &str) -> bool {
        self.is_set(snake) || self.is_set(&camel_case(snake))
    }

    /// Resolves a path parameter to its string form.
    ///
    /// The snake_case spelling wins over the camelCase one. Lists are joined
    /// with `,`, scalars are stringified, `null` counts as absent.
    pub fn path_value(&self, snake: &str) -> Option<String> {
        let value = self
            .0
            .get(snake)
            .filter(|v| !v.is_null())
            .or_else(|| self.0.get(&camel_case(snake)).filter(|v| !v.is_null()))?;

        match value {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(super::request::scalar_to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            other => super::request::scalar_to_string(other),
        }
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the parameters into the underlying JSON map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Converts a snake_case name into its camelCase spelling.
///
/// # Example
///
/// ```rust
/// use esclient::api::params::camel_case;
///
/// assert_eq!(camel_case("job_id"), "jobId");
/// assert_eq!(camel_case("rest_total_hits_as_int"), "restTotalHitsAsInt");
/// assert_eq!(camel_case("index"), "index");
/// ```
pub fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    let mut leading = true;
    for c in snake.chars() {
        if c == '_' {
            if leading {
                out.push(c);
            } else {
                upper = true;
            }
            continue;
        }
        leading = false;
        if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = Params::from_value(json!("index")).unwrap_err();
        assert!(err.is_configuration());
        assert!(Params::from_value(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_camel_spelling_lookup() {
        let params = Params::new().set("jobId", "job-1");
        assert!(params.has_path_param("job_id"));
        assert_eq!(params.path_value("job_id"), Some("job-1".to_string()));
    }

    #[test]
    fn test_snake_spelling_wins() {
        let params = Params::new().set("jobId", "camel").set("job_id", "snake");
        assert_eq!(params.path_value("job_id"), Some("snake".to_string()));
    }

    #[test]
    fn test_null_path_param_is_absent() {
        let params = Params::new().set("index", Value::Null);
        assert!(!params.has_path_param("index"));
        assert_eq!(params.path_value("index"), None);
    }

    #[test]
    fn test_list_path_value_joined() {
        let params = Params::new().set("index", json!(["a", "b"]));
        assert_eq!(params.path_value("index"), Some("a,b".to_string()));
    }

    #[test]
    fn test_camel_case_leading_underscore() {
        assert_eq!(camel_case("_source"), "_source");
    }
}
