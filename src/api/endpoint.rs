//
//  esclient
//  api/endpoint.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Declarative endpoint descriptors and the generic request builder.
//!
//! Each REST endpoint is a `'static` [`Endpoint`] value: its method rule,
//! path templates, required parameters, body rule and query tables. A single
//! builder, [`Endpoint::build`], turns a [`Params`] object into a
//! [`RequestDescriptor`] for any of them.
//!
//! # Build steps
//!
//! 1. Required path parameters (either spelling) must be present
//! 2. The body must agree with the endpoint's [`BodyRule`]
//! 3. `method`, `body`, path parameters and body-level keys are extracted
//! 4. Whatever remains is mapped into the querystring, collecting warnings
//! 5. The most specific satisfied path template is rendered
//! 6. The method is resolved from the [`MethodRule`]
//!
//! Steps 1 to 3 and 5 can fail with a configuration error. Nothing here
//! performs I/O.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::debug;

use super::error::ApiError;
use super::params::{camel_case, Params, BODY_KEY, METHOD_KEY};
use super::path::{resolve_path, PathTemplate};
use super::querystring::{map_querystring, QueryTable, Warnings};
use super::request::{Method, RequestBody, RequestDescriptor};

/// How an endpoint picks its HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodRule {
    /// Always this method, regardless of body or explicit `method`.
    Fixed(Method),
    /// `GET` without a body, `POST` with one; an explicit `method` wins.
    ByBody,
    /// Like [`MethodRule::ByBody`], but an explicit `method` must be one of
    /// the listed methods.
    OneOf(&'static [Method]),
    /// The method bound to the chosen path template.
    ByPath,
}

/// What an endpoint expects of the `body` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRule {
    /// Supplying a body is a configuration error.
    Forbidden,
    /// A JSON body may be supplied.
    Optional,
    /// A JSON body must be supplied.
    Required,
    /// A newline-delimited body (list of documents) must be supplied.
    Bulk,
}

/// Static description of one REST endpoint.
///
/// # Example
///
/// ```rust
/// use esclient::api::endpoint::{BodyRule, Endpoint, MethodRule};
/// use esclient::api::path::{PathTemplate, Segment::{Lit, Param}};
/// use esclient::api::{Method, Params};
///
/// static GET_USER: Endpoint = Endpoint {
///     name: "security.get_user",
///     method: MethodRule::Fixed(Method::Get),
///     paths: &[
///         PathTemplate::new(&[Lit("_security"), Lit("user"), Param("username")]),
///         PathTemplate::new(&[Lit("_security"), Lit("user")]),
///     ],
///     required: &[],
///     body: BodyRule::Forbidden,
///     accepted_query: &[],
///     aliases: &[],
///     accepted_body: &[],
///     documentation: "",
/// };
///
/// let built = GET_USER.build(&Params::new().set("username", "elastic")).unwrap();
/// assert_eq!(built.request.path, "/_security/user/elastic");
/// assert_eq!(built.request.method, Method::Get);
/// ```
#[derive(Debug)]
pub struct Endpoint {
    /// Dotted API name, e.g. `async_search.get`.
    pub name: &'static str,
    /// Method selection rule.
    pub method: MethodRule,
    /// Mutually exclusive path shapes.
    pub paths: &'static [PathTemplate],
    /// Path parameters that must always be supplied (snake_case).
    pub required: &'static [&'static str],
    /// Body expectations.
    pub body: BodyRule,
    /// Canonical query parameter names the endpoint recognizes.
    pub accepted_query: &'static [&'static str],
    /// camelCase → snake_case aliases for query parameters.
    pub aliases: &'static [(&'static str, &'static str)],
    /// Top-level parameters that belong in the JSON body.
    pub accepted_body: &'static [&'static str],
    /// Reference documentation URL.
    pub documentation: &'static str,
}

/// Output of [`Endpoint::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRequest {
    /// The request descriptor.
    pub request: RequestDescriptor,
    /// Warnings collected during mapping, `None` if there were none.
    pub warnings: Option<Vec<String>>,
}

impl Endpoint {
    /// Returns the query tables of this endpoint.
    pub fn query_table(&self) -> QueryTable<'static> {
        QueryTable {
            accepted: self.accepted_query,
            aliases: self.aliases,
        }
    }

    /// Returns every path parameter name used by any template, deduplicated.
    pub fn path_params(&self) -> BTreeSet<&'static str> {
        self.paths.iter().flat_map(|t| t.params()).collect()
    }

    /// Builds the request descriptor for `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when a required path parameter or
    /// body is missing, a body is supplied to a body-less endpoint, an
    /// explicit method is invalid, or a path parameter cannot be placed.
    pub fn build(&self, params: &Params) -> Result<BuiltRequest, ApiError> {
        self.check_required(params)?;

        let mut residual = params.clone().into_map();
        let explicit_method = residual.remove(METHOD_KEY).filter(|v| !v.is_null());
        let raw_body = residual.remove(BODY_KEY).filter(|v| !v.is_null());

        for name in self.path_params() {
            residual.remove(name);
            residual.remove(&camel_case(name));
        }

        let body_fields: Map<String, Value> = self
            .accepted_body
            .iter()
            .filter_map(|key| residual.remove(*key).map(|v| ((*key).to_string(), v)))
            .filter(|(_, v)| !v.is_null())
            .collect();

        let body = self.assemble_body(raw_body, body_fields)?;

        let mut warnings = Warnings::new();
        let querystring = map_querystring(&self.query_table(), residual, &mut warnings);

        let resolved = resolve_path(self.paths, params)?;
        let method = match self.method {
            MethodRule::Fixed(method) => method,
            MethodRule::ByPath => resolved.template.method.unwrap_or(Method::Get),
            MethodRule::ByBody => body_method(explicit_method, body.is_some())?,
            MethodRule::OneOf(allowed) => {
                let method = body_method(explicit_method, body.is_some())?;
                if !allowed.contains(&method) {
                    let names: Vec<&str> = allowed.iter().map(|m| m.as_str()).collect();
                    return Err(ApiError::configuration(format!(
                        "Invalid method: should be one of {}",
                        names.join(", ")
                    )));
                }
                method
            }
        };

        debug!(
            api = self.name,
            method = %method,
            path = %resolved.path,
            query_params = querystring.len(),
            "built request"
        );

        Ok(BuiltRequest {
            request: RequestDescriptor {
                method,
                path: resolved.path,
                body,
                querystring,
            },
            warnings: warnings.into_inner(),
        })
    }

    fn check_required(&self, params: &Params) -> Result<(), ApiError> {
        for name in self.required {
            if !params.has_path_param(name) {
                let camel = camel_case(name);
                let message = if camel == *name {
                    format!("Missing required parameter: {}", name)
                } else {
                    format!("Missing required parameter: {} or {}", name, camel)
                };
                return Err(ApiError::configuration(message));
            }
        }

        match self.body {
            BodyRule::Forbidden if params.has_body() => {
                Err(ApiError::configuration("This API does not require a body"))
            }
            BodyRule::Required | BodyRule::Bulk if !params.has_body() => {
                Err(ApiError::configuration("Missing required parameter: body"))
            }
            _ => Ok(()),
        }
    }

    fn assemble_body(
        &self,
        raw: Option<Value>,
        fields: Map<String, Value>,
    ) -> Result<Option<RequestBody>, ApiError> {
        if self.body == BodyRule::Bulk {
            return match raw {
                Some(Value::Array(lines)) => Ok(Some(RequestBody::Bulk(lines))),
                Some(Value::String(text)) => Ok(Some(RequestBody::Bulk(
                    text.lines()
                        .filter(|line| !line.trim().is_empty())
                        .map(|line| Value::String(line.to_string()))
                        .collect(),
                ))),
                Some(_) => Err(ApiError::configuration(
                    "Bulk body should be a list of documents or newline-delimited JSON",
                )),
                None => Ok(None),
            };
        }

        if fields.is_empty() {
            return Ok(raw.map(RequestBody::Json));
        }

        match raw {
            None => Ok(Some(RequestBody::Json(Value::Object(fields)))),
            Some(Value::Object(mut body)) => {
                body.extend(fields);
                Ok(Some(RequestBody::Json(Value::Object(body))))
            }
            Some(_) => Err(ApiError::configuration(format!(
                "Body must be an object to accept the fields: {}",
                fields.keys().cloned().collect::<Vec<_>>().join(", ")
            ))),
        }
    }
}

/// Explicit `method` parameter if given, otherwise GET without a body and
/// POST with one.
fn body_method(explicit: Option<Value>, has_body: bool) -> Result<Method, ApiError> {
    match explicit {
        Some(Value::String(m)) => m.parse(),
        Some(other) => Err(ApiError::configuration(format!("Invalid method: {}", other))),
        None if has_body => Ok(Method::Post),
        None => Ok(Method::Get),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::path::Segment::{Lit, Param};
    use crate::api::request::QueryValue;
    use serde_json::json;

    static GET_RECORDS: Endpoint = Endpoint {
        name: "ml.get_records",
        method: MethodRule::ByBody,
        paths: &[PathTemplate::new(&[
            Lit("_ml"),
            Lit("anomaly_detectors"),
            Param("job_id"),
            Lit("results"),
            Lit("records"),
        ])],
        required: &["job_id"],
        body: BodyRule::Optional,
        accepted_query: &["exclude_interim", "from", "size", "record_score", "desc"],
        aliases: &[("excludeInterim", "exclude_interim"), ("recordScore", "record_score")],
        accepted_body: &[],
        documentation: "",
    };

    static SUBMIT: Endpoint = Endpoint {
        name: "async_search.submit",
        method: MethodRule::Fixed(Method::Post),
        paths: &[
            PathTemplate::new(&[Param("index"), Lit("_async_search")]),
            PathTemplate::new(&[Lit("_async_search")]),
        ],
        required: &[],
        body: BodyRule::Optional,
        accepted_query: &["wait_for_completion_timeout"],
        aliases: &[("waitForCompletionTimeout", "wait_for_completion_timeout")],
        accepted_body: &["query", "size"],
        documentation: "",
    };

    static INDEX_DOC: Endpoint = Endpoint {
        name: "index",
        method: MethodRule::ByPath,
        paths: &[
            PathTemplate::with_method(&[Param("index"), Lit("_doc"), Param("id")], Method::Put),
            PathTemplate::with_method(&[Param("index"), Lit("_doc")], Method::Post),
        ],
        required: &["index"],
        body: BodyRule::Required,
        accepted_query: &["refresh"],
        aliases: &[],
        accepted_body: &[],
        documentation: "",
    };

    static BULK: Endpoint = Endpoint {
        name: "bulk",
        method: MethodRule::Fixed(Method::Post),
        paths: &[PathTemplate::new(&[Lit("_bulk")])],
        required: &[],
        body: BodyRule::Bulk,
        accepted_query: &[],
        aliases: &[],
        accepted_body: &[],
        documentation: "",
    };

    #[test]
    fn test_missing_required_names_both_spellings() {
        let err = GET_RECORDS.build(&Params::new()).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required parameter: job_id or jobId"
        );
    }

    #[test]
    fn test_camel_case_path_param() {
        let built = GET_RECORDS
            .build(&Params::new().set("jobId", "job 1").set("excludeInterim", true))
            .unwrap();
        assert_eq!(
            built.request.path,
            "/_ml/anomaly_detectors/job%201/results/records"
        );
        assert!(built.request.querystring.contains_key("exclude_interim"));
        assert!(!built.request.querystring.contains_key("jobId"));
        assert_eq!(built.warnings, None);
    }

    #[test]
    fn test_method_defaults_from_body() {
        let params = Params::new().set("job_id", "j");
        assert_eq!(GET_RECORDS.build(&params).unwrap().request.method, Method::Get);

        let with_body = params.body(json!({"sort": "timestamp"}));
        assert_eq!(GET_RECORDS.build(&with_body).unwrap().request.method, Method::Post);
    }

    #[test]
    fn test_explicit_method_honoured_for_body_rule() {
        let params = Params::new().set("job_id", "j").method("post");
        assert_eq!(GET_RECORDS.build(&params).unwrap().request.method, Method::Post);

        let bad = Params::new().set("job_id", "j").method("PATCH");
        assert!(GET_RECORDS.build(&bad).unwrap_err().is_configuration());
    }

    #[test]
    fn test_fixed_method_wins() {
        let params = Params::new().method("GET");
        assert_eq!(SUBMIT.build(&params).unwrap().request.method, Method::Post);
    }

    #[test]
    fn test_body_fields_moved_into_body() {
        let params = Params::new()
            .set("index", "logs")
            .set("query", json!({"match_all": {}}))
            .set("size", 5)
            .set("waitForCompletionTimeout", "2s");
        let built = SUBMIT.build(&params).unwrap();

        assert_eq!(built.request.path, "/logs/_async_search");
        assert_eq!(
            built.request.body,
            Some(RequestBody::Json(json!({"query": {"match_all": {}}, "size": 5})))
        );
        assert_eq!(
            built.request.querystring.get("wait_for_completion_timeout"),
            Some(&QueryValue::Single("2s".to_string()))
        );
    }

    #[test]
    fn test_body_fields_merged_with_body() {
        let params = Params::new()
            .body(json!({"aggs": {}}))
            .set("size", 0);
        let built = SUBMIT.build(&params).unwrap();
        assert_eq!(
            built.request.body,
            Some(RequestBody::Json(json!({"aggs": {}, "size": 0})))
        );
    }

    #[test]
    fn test_method_by_path() {
        let with_id = Params::new()
            .set("index", "docs")
            .set("id", "1")
            .body(json!({"title": "x"}));
        let built = INDEX_DOC.build(&with_id).unwrap();
        assert_eq!(built.request.method, Method::Put);
        assert_eq!(built.request.path, "/docs/_doc/1");

        let without_id = Params::new().set("index", "docs").body(json!({"title": "x"}));
        assert_eq!(INDEX_DOC.build(&without_id).unwrap().request.method, Method::Post);
    }

    #[test]
    fn test_required_body() {
        let err = INDEX_DOC.build(&Params::new().set("index", "docs")).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Missing required parameter: body");
    }

    #[test]
    fn test_bulk_body_from_list_and_text() {
        let list = Params::new().body(json!([{"index": {"_index": "a"}}, {"f": 1}]));
        match BULK.build(&list).unwrap().request.body {
            Some(RequestBody::Bulk(lines)) => assert_eq!(lines.len(), 2),
            other => panic!("unexpected body: {:?}", other),
        }

        let text = Params::new().body("{\"delete\":{\"_id\":\"1\"}}\n\n{\"index\":{}}\n");
        match BULK.build(&text).unwrap().request.body {
            Some(RequestBody::Bulk(lines)) => assert_eq!(lines.len(), 2),
            other => panic!("unexpected body: {:?}", other),
        }

        let object = Params::new().body(json!({"not": "a list"}));
        assert!(BULK.build(&object).unwrap_err().is_configuration());
    }

    #[test]
    fn test_restricted_method_list() {
        static MSEARCH: Endpoint = Endpoint {
            name: "msearch",
            method: MethodRule::OneOf(&[Method::Get, Method::Post]),
            paths: &[PathTemplate::new(&[Lit("_msearch")])],
            required: &[],
            body: BodyRule::Bulk,
            accepted_query: &[],
            aliases: &[],
            accepted_body: &[],
            documentation: "",
        };

        let body = json!([{}, {"query": {"match_all": {}}}]);
        let get = Params::new().body(body.clone()).method("get");
        assert_eq!(MSEARCH.build(&get).unwrap().request.method, Method::Get);

        let put = Params::new().body(body).method("PUT");
        let err = MSEARCH.build(&put).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid method: should be one of GET, POST"
        );
    }

    #[test]
    fn test_unknown_param_warned_and_forwarded() {
        let params = Params::new().set("job_id", "j").set("brandNewOption", "yes");
        let built = GET_RECORDS.build(&params).unwrap();
        assert!(built.request.querystring.contains_key("brandNewOption"));
        let warnings = built.warnings.unwrap();
        assert!(warnings[0].contains("\"brandNewOption\""));
    }
}
