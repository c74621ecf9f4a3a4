//
//  esclient
//  api/querystring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Querystring mapping with lenient unknown-parameter handling.
//!
//! After path, body and method fields are taken out of the parameter object,
//! whatever remains becomes the querystring. Each key is first translated
//! through the endpoint's alias table (camelCase → snake_case, identity when
//! absent). Keys whose canonical name the endpoint does not know are still
//! forwarded, but a warning is recorded so the caller can spot typos:
//!
//! ```text
//! Client - Unknown parameter: "<key>", sending it as query parameter
//! ```
//!
//! Servers routinely grow parameters the client tables do not list yet, so
//! rejecting them outright would break older clients against newer servers.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

use super::request::QueryValue;

/// Query parameters every endpoint accepts.
pub const COMMON_QUERY: &[&str] = &["pretty", "human", "error_trace", "source", "filter_path"];

/// Aliases for the common query parameters.
pub const COMMON_ALIASES: &[(&str, &str)] = &[("errorTrace", "error_trace"), ("filterPath", "filter_path")];

/// Explicit warnings collector threaded through request building.
///
/// The underlying list is only allocated once the first warning is pushed,
/// so the common case of a clean call carries `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings(Option<Vec<String>>);

impl Warnings {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a free-form warning.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.get_or_insert_with(Vec::new).push(message.into());
    }

    /// Records an unknown query parameter.
    pub fn unknown_parameter(&mut self, key: &str) {
        warn!(parameter = key, "unknown parameter forwarded as query parameter");
        self.push(format!(
            "Client - Unknown parameter: \"{}\", sending it as query parameter",
            key
        ));
    }

    /// Returns `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.as_ref().map_or(true, Vec::is_empty)
    }

    /// Returns the collected warnings, `None` when there are none.
    pub fn into_inner(self) -> Option<Vec<String>> {
        self.0
    }
}

/// The static query tables of one endpoint.
#[derive(Debug, Clone, Copy)]
pub struct QueryTable<'a> {
    /// Canonical parameter names the endpoint recognizes.
    pub accepted: &'a [&'a str],
    /// camelCase → snake_case aliases.
    pub aliases: &'a [(&'a str, &'a str)],
}

impl<'a> QueryTable<'a> {
    /// Resolves the canonical name of `key`, consulting the common aliases
    /// after the endpoint's own.
    pub fn canonical<'k>(&self, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        self.aliases
            .iter()
            .chain(COMMON_ALIASES.iter())
            .find(|(camel, _)| *camel == key)
            .map_or(key, |(_, snake)| *snake)
    }

    /// Returns `true` if the canonical name is known to the endpoint.
    pub fn accepts(&self, canonical: &str) -> bool {
        self.accepted.contains(&canonical) || COMMON_QUERY.contains(&canonical)
    }
}

/// Maps residual parameters into a canonical querystring.
///
/// Every key is renamed through the alias table and forwarded; keys the
/// endpoint does not accept add a warning to `warnings`. `null` values are
/// dropped as if they had not been supplied.
///
/// # Example
///
/// ```rust
/// use esclient::api::querystring::{map_querystring, QueryTable, Warnings};
/// use serde_json::{json, Map, Value};
///
/// let table = QueryTable {
///     accepted: &["ignore_unavailable"],
///     aliases: &[("ignoreUnavailable", "ignore_unavailable")],
/// };
/// let mut residual = Map::new();
/// residual.insert("ignoreUnavailable".into(), json!(true));
/// residual.insert("futureFlag".into(), json!("on"));
///
/// let mut warnings = Warnings::new();
/// let qs = map_querystring(&table, residual, &mut warnings);
///
/// assert!(qs.contains_key("ignore_unavailable"));
/// assert!(qs.contains_key("futureFlag"));
/// assert!(!warnings.is_empty());
/// ```
pub fn map_querystring(
    table: &QueryTable<'_>,
    residual: Map<String, Value>,
    warnings: &mut Warnings,
) -> BTreeMap<String, QueryValue> {
    let mut querystring = BTreeMap::new();

    for (key, value) in residual {
        let Some(value) = QueryValue::from_json(&value) else {
            continue;
        };

        let canonical = table.canonical(&key);
        if !table.accepts(canonical) {
            warnings.unknown_parameter(&key);
        }
        querystring.insert(canonical.to_string(), value);
    }

    querystring
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COUNT: QueryTable<'static> = QueryTable {
        accepted: &["ignore_unavailable", "min_score", "q"],
        aliases: &[("ignoreUnavailable", "ignore_unavailable"), ("minScore", "min_score")],
    };

    fn map(value: Value) -> (BTreeMap<String, QueryValue>, Option<Vec<String>>) {
        let residual = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let mut warnings = Warnings::new();
        let querystring = map_querystring(&COUNT, residual, &mut warnings);
        (querystring, warnings.into_inner())
    }

    #[test]
    fn test_alias_maps_to_snake_case() {
        let (qs, warnings) = map(json!({"minScore": 1.5}));
        assert!(qs.contains_key("min_score"));
        assert!(!qs.contains_key("minScore"));
        assert_eq!(warnings, None);
    }

    #[test]
    fn test_common_alias_accepted() {
        let (qs, warnings) = map(json!({"filterPath": "count"}));
        assert_eq!(qs.get("filter_path"), Some(&QueryValue::Single("count".to_string())));
        assert_eq!(warnings, None);
    }

    #[test]
    fn test_unknown_key_forwarded_with_warning() {
        let (qs, warnings) = map(json!({"newServerFlag": true}));
        assert_eq!(qs.get("newServerFlag"), Some(&QueryValue::Single("true".to_string())));
        let warnings = warnings.unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0],
            "Client - Unknown parameter: \"newServerFlag\", sending it as query parameter"
        );
    }

    #[test]
    fn test_snake_case_input_passes_through() {
        let (qs, warnings) = map(json!({"ignore_unavailable": false}));
        assert!(qs.contains_key("ignore_unavailable"));
        assert_eq!(warnings, None);
    }

    #[test]
    fn test_null_values_dropped() {
        let (qs, warnings) = map(json!({"q": null, "typo": null}));
        assert!(qs.is_empty());
        assert_eq!(warnings, None);
    }

    #[test]
    fn test_warnings_lazily_allocated() {
        let warnings = Warnings::new();
        assert!(warnings.is_empty());
        assert_eq!(warnings.into_inner(), None);
    }
}
