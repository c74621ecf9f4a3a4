//
//  esclient
//  api/path.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Path templates, template selection and segment encoding.
//!
//! An endpoint declares a handful of mutually exclusive [`PathTemplate`]s,
//! for example `/{index}/{type}/_count`, `/{index}/_count` and `/_count`.
//! The builder picks the most specific template whose parameters are all
//! present and renders it, percent-encoding each user-supplied segment on its
//! own so that a `/` inside an index name can never split the path.
//!
//! Encoding follows the JavaScript `encodeURIComponent` character set: only
//! ASCII alphanumerics and `- _ . ! ~ * ' ( )` are left untouched.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::error::ApiError;
use super::params::Params;
use super::request::Method;

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes one path segment.
///
/// # Example
///
/// ```rust
/// use esclient::api::path::encode_segment;
///
/// assert_eq!(encode_segment("logs/2024"), "logs%2F2024");
/// assert_eq!(encode_segment("a,b"), "a%2Cb");
/// assert_eq!(encode_segment("my-index_1"), "my-index_1");
/// ```
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Decodes a percent-encoded path segment, as the server does.
pub fn decode_segment(segment: &str) -> Result<String, ApiError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|err| ApiError::configuration(format!("Invalid path segment encoding: {}", err)))
}

/// One piece of a path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Fixed text, emitted verbatim.
    Lit(&'static str),
    /// A parameter, by snake_case name, emitted percent-encoded.
    Param(&'static str),
}

/// A single URL shape of an endpoint.
///
/// `method` is only consulted for endpoints whose method depends on the
/// chosen path (for example indexing a document with or without an id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTemplate {
    /// Segments joined with `/`.
    pub segments: &'static [Segment],
    /// Method bound to this shape, if any.
    pub method: Option<Method>,
}

impl PathTemplate {
    /// Creates a template without a bound method.
    pub const fn new(segments: &'static [Segment]) -> Self {
        Self {
            segments,
            method: None,
        }
    }

    /// Creates a template bound to `method`.
    pub const fn with_method(segments: &'static [Segment], method: Method) -> Self {
        Self {
            segments,
            method: Some(method),
        }
    }

    /// Iterates over the parameter names in this template.
    pub fn params(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(*name),
            Segment::Lit(_) => None,
        })
    }

    /// Number of parameters; higher is more specific.
    pub fn specificity(&self) -> usize {
        self.params().count()
    }

    /// Returns `true` when every parameter of the template is supplied.
    pub fn is_satisfied_by(&self, params: &Params) -> bool {
        self.params().all(|name| params.has_path_param(name))
    }

    /// Returns `true` if the template uses parameter `name`.
    pub fn uses(&self, name: &str) -> bool {
        self.params().any(|p| p == name)
    }

    /// Renders the template with encoded parameter values.
    ///
    /// Returns `None` if a parameter is missing.
    pub fn render(&self, params: &Params) -> Option<String> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in self.segments {
            match segment {
                Segment::Lit(text) => parts.push((*text).to_string()),
                Segment::Param(name) => parts.push(encode_segment(&params.path_value(name)?)),
            }
        }
        Some(format!("/{}", parts.join("/")))
    }

    /// Human readable pattern, such as `/{index}/_count`.
    pub fn pattern(&self) -> String {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Lit(text) => (*text).to_string(),
                Segment::Param(name) => format!("{{{}}}", name),
            })
            .collect();
        format!("/{}", parts.join("/"))
    }
}

/// The template chosen for a call together with the rendered path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Template that matched.
    pub template: &'static PathTemplate,
    /// Rendered, percent-encoded path.
    pub path: String,
}

/// Picks and renders the most specific satisfied template.
///
/// Templates are ranked by the number of parameters; among equally specific
/// templates the one declared first wins. A path parameter that was supplied
/// but is not used by the winner means a companion parameter is missing
/// (for instance `type` without `index`), which is reported as a
/// configuration error rather than silently dropped.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when no template can be satisfied or a
/// supplied path parameter would be discarded.
pub fn resolve_path(templates: &'static [PathTemplate], params: &Params) -> Result<ResolvedPath, ApiError> {
    let mut chosen: Option<&'static PathTemplate> = None;
    for template in templates {
        if !template.is_satisfied_by(params) {
            continue;
        }
        if chosen.map_or(true, |best| template.specificity() > best.specificity()) {
            chosen = Some(template);
        }
    }

    let Some(template) = chosen else {
        let missing = templates
            .iter()
            .min_by_key(|t| t.specificity())
            .map(|t| missing_params(t, params))
            .unwrap_or_default();
        return Err(missing_url_params(&missing));
    };

    for name in templates.iter().flat_map(|t| t.params()) {
        if params.has_path_param(name) && !template.uses(name) {
            let missing = templates
                .iter()
                .filter(|t| t.uses(name))
                .min_by_key(|t| t.specificity())
                .map(|t| missing_params(t, params))
                .unwrap_or_default();
            return Err(missing_url_params(&missing));
        }
    }

    let path = template
        .render(params)
        .ok_or_else(|| ApiError::configuration("Unable to render request path"))?;

    Ok(ResolvedPath { template, path })
}

fn missing_params(template: &PathTemplate, params: &Params) -> Vec<&'static str> {
    template
        .params()
        .filter(|name| !params.has_path_param(name))
        .collect()
}

fn missing_url_params(names: &[&str]) -> ApiError {
    ApiError::configuration(format!(
        "Missing required parameter of the url: {}",
        names.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use Segment::{Lit, Param};

    static ASYNC_SEARCH: [PathTemplate; 2] = [
        PathTemplate::new(&[Lit("_async_search"), Param("id")]),
        PathTemplate::new(&[Lit("_async_search")]),
    ];

    static COUNT: [PathTemplate; 3] = [
        PathTemplate::new(&[Param("index"), Param("type"), Lit("_count")]),
        PathTemplate::new(&[Param("index"), Lit("_count")]),
        PathTemplate::new(&[Lit("_count")]),
    ];

    #[test]
    fn test_specific_template_selected() {
        let params = Params::new().set("id", "xyz");
        let resolved = resolve_path(&ASYNC_SEARCH, &params).unwrap();
        assert_eq!(resolved.path, "/_async_search/xyz");
    }

    #[test]
    fn test_fallback_template() {
        let resolved = resolve_path(&ASYNC_SEARCH, &Params::new()).unwrap();
        assert_eq!(resolved.path, "/_async_search");
    }

    #[test]
    fn test_three_levels() {
        let both = Params::new().set("index", "logs").set("type", "_doc");
        assert_eq!(resolve_path(&COUNT, &both).unwrap().path, "/logs/_doc/_count");

        let index = Params::new().set("index", "logs");
        assert_eq!(resolve_path(&COUNT, &index).unwrap().path, "/logs/_count");

        assert_eq!(resolve_path(&COUNT, &Params::new()).unwrap().path, "/_count");
    }

    #[test]
    fn test_orphan_param_reports_companion() {
        let params = Params::new().set("type", "_doc");
        let err = resolve_path(&COUNT, &params).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().ends_with("Missing required parameter of the url: index"));
    }

    #[test]
    fn test_segments_encoded_individually() {
        let params = Params::new().set("index", "logs/2024 q1");
        assert_eq!(resolve_path(&COUNT, &params).unwrap().path, "/logs%2F2024%20q1/_count");
    }

    #[test]
    fn test_list_param_joined_then_encoded() {
        let params = Params::new().set("index", json!(["a", "b"]));
        assert_eq!(resolve_path(&COUNT, &params).unwrap().path, "/a%2Cb/_count");
    }

    #[test]
    fn test_round_trip_reserved_characters() {
        for original in ["logs/2024", "a b+c", "weird?#%&=name", "ünïcødé/ß"] {
            let encoded = encode_segment(original);
            assert!(!encoded.contains('/'));
            assert_eq!(decode_segment(&encoded).unwrap(), original);
        }
    }

    #[test]
    fn test_pattern() {
        assert_eq!(COUNT[1].pattern(), "/{index}/_count");
        assert_eq!(COUNT[2].specificity(), 0);
    }
}
