//
//  esclient
//  api/catalog.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The static endpoint table.
//!
//! Every supported REST endpoint is a single [`Endpoint`] value below. Adding
//! an endpoint means adding data here; the request builder, dispatcher and
//! CLI pick it up without further changes.
//!
//! | Group | Endpoints |
//! |-------|-----------|
//! | Core | `info`, `ping`, `search`, `count`, `scroll`, `clear_scroll`, `msearch`, `bulk` |
//! | Documents | `index`, `get`, `delete` |
//! | Indices | `indices.create`, `indices.delete`, `indices.exists` |
//! | Async search | `async_search.submit`, `async_search.get`, `async_search.status`, `async_search.delete` |
//! | ML | `ml.get_records` |
//! | Security | `security.get_user` |
//! | Migration | `migration.deprecations`, `migration.get_feature_upgrade_status`, `migration.post_feature_upgrade` |

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::endpoint::{BodyRule, Endpoint, MethodRule};
use super::error::ApiError;
use super::path::PathTemplate;
use super::path::Segment::{Lit, Param};
use super::request::Method;

/// Query parameters shared by search-like endpoints.
const SEARCH_QUERY: &[&str] = &[
    "analyzer",
    "analyze_wildcard",
    "allow_no_indices",
    "allow_partial_search_results",
    "batched_reduce_size",
    "default_operator",
    "df",
    "docvalue_fields",
    "expand_wildcards",
    "explain",
    "from",
    "ignore_throttled",
    "ignore_unavailable",
    "lenient",
    "max_concurrent_shard_requests",
    "preference",
    "q",
    "request_cache",
    "rest_total_hits_as_int",
    "routing",
    "scroll",
    "search_type",
    "seq_no_primary_term",
    "size",
    "sort",
    "_source",
    "_source_excludes",
    "_source_includes",
    "stats",
    "stored_fields",
    "suggest_field",
    "suggest_mode",
    "suggest_size",
    "suggest_text",
    "terminate_after",
    "timeout",
    "track_scores",
    "track_total_hits",
    "typed_keys",
    "version",
];

const SEARCH_ALIASES: &[(&str, &str)] = &[
    ("analyzeWildcard", "analyze_wildcard"),
    ("allowNoIndices", "allow_no_indices"),
    ("allowPartialSearchResults", "allow_partial_search_results"),
    ("batchedReduceSize", "batched_reduce_size"),
    ("defaultOperator", "default_operator"),
    ("docvalueFields", "docvalue_fields"),
    ("expandWildcards", "expand_wildcards"),
    ("ignoreThrottled", "ignore_throttled"),
    ("ignoreUnavailable", "ignore_unavailable"),
    ("maxConcurrentShardRequests", "max_concurrent_shard_requests"),
    ("requestCache", "request_cache"),
    ("restTotalHitsAsInt", "rest_total_hits_as_int"),
    ("searchType", "search_type"),
    ("seqNoPrimaryTerm", "seq_no_primary_term"),
    ("_sourceExcludes", "_source_excludes"),
    ("_sourceIncludes", "_source_includes"),
    ("storedFields", "stored_fields"),
    ("suggestField", "suggest_field"),
    ("suggestMode", "suggest_mode"),
    ("suggestSize", "suggest_size"),
    ("suggestText", "suggest_text"),
    ("terminateAfter", "terminate_after"),
    ("trackScores", "track_scores"),
    ("trackTotalHits", "track_total_hits"),
    ("typedKeys", "typed_keys"),
];

/// Query parameters of single-document operations.
const DOC_QUERY: &[&str] = &[
    "if_primary_term",
    "if_seq_no",
    "op_type",
    "pipeline",
    "preference",
    "realtime",
    "refresh",
    "require_alias",
    "routing",
    "_source",
    "_source_excludes",
    "_source_includes",
    "stored_fields",
    "timeout",
    "version",
    "version_type",
    "wait_for_active_shards",
];

const DOC_ALIASES: &[(&str, &str)] = &[
    ("ifPrimaryTerm", "if_primary_term"),
    ("ifSeqNo", "if_seq_no"),
    ("opType", "op_type"),
    ("requireAlias", "require_alias"),
    ("_sourceExcludes", "_source_excludes"),
    ("_sourceIncludes", "_source_includes"),
    ("storedFields", "stored_fields"),
    ("versionType", "version_type"),
    ("waitForActiveShards", "wait_for_active_shards"),
];

/// Query parameters of index-level administration.
const INDICES_QUERY: &[&str] = &[
    "allow_no_indices",
    "expand_wildcards",
    "flat_settings",
    "ignore_unavailable",
    "include_defaults",
    "local",
    "master_timeout",
    "timeout",
    "wait_for_active_shards",
];

const INDICES_ALIASES: &[(&str, &str)] = &[
    ("allowNoIndices", "allow_no_indices"),
    ("expandWildcards", "expand_wildcards"),
    ("flatSettings", "flat_settings"),
    ("ignoreUnavailable", "ignore_unavailable"),
    ("includeDefaults", "include_defaults"),
    ("masterTimeout", "master_timeout"),
    ("waitForActiveShards", "wait_for_active_shards"),
];

/// Top-level search keys that belong in the async search body.
const SEARCH_BODY: &[&str] = &[
    "aggs",
    "aggregations",
    "collapse",
    "explain",
    "from",
    "highlight",
    "track_total_hits",
    "indices_boost",
    "docvalue_fields",
    "min_score",
    "post_filter",
    "profile",
    "query",
    "rescore",
    "script_fields",
    "search_after",
    "size",
    "slice",
    "sort",
    "_source",
    "fields",
    "suggest",
    "terminate_after",
    "timeout",
    "track_scores",
    "version",
    "seq_no_primary_term",
    "stored_fields",
    "pit",
    "runtime_mappings",
    "stats",
];

pub static INFO: Endpoint = Endpoint {
    name: "info",
    method: MethodRule::Fixed(Method::Get),
    paths: &[PathTemplate::new(&[])],
    required: &[],
    body: BodyRule::Forbidden,
    accepted_query: &[],
    aliases: &[],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/index.html",
};

pub static PING: Endpoint = Endpoint {
    name: "ping",
    method: MethodRule::Fixed(Method::Head),
    paths: &[PathTemplate::new(&[])],
    required: &[],
    body: BodyRule::Forbidden,
    accepted_query: &[],
    aliases: &[],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/index.html",
};

pub static SEARCH: Endpoint = Endpoint {
    name: "search",
    method: MethodRule::ByBody,
    paths: &[
        PathTemplate::new(&[Param("index"), Lit("_search")]),
        PathTemplate::new(&[Lit("_search")]),
    ],
    required: &[],
    body: BodyRule::Optional,
    accepted_query: SEARCH_QUERY,
    aliases: SEARCH_ALIASES,
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/search-search.html",
};

pub static COUNT: Endpoint = Endpoint {
    name: "count",
    method: MethodRule::ByBody,
    paths: &[
        PathTemplate::new(&[Param("index"), Param("type"), Lit("_count")]),
        PathTemplate::new(&[Param("index"), Lit("_count")]),
        PathTemplate::new(&[Lit("_count")]),
    ],
    required: &[],
    body: BodyRule::Optional,
    accepted_query: &[
        "ignore_unavailable",
        "ignore_throttled",
        "allow_no_indices",
        "expand_wildcards",
        "min_score",
        "preference",
        "routing",
        "q",
        "analyzer",
        "analyze_wildcard",
        "default_operator",
        "df",
        "lenient",
        "terminate_after",
    ],
    aliases: &[
        ("ignoreUnavailable", "ignore_unavailable"),
        ("ignoreThrottled", "ignore_throttled"),
        ("allowNoIndices", "allow_no_indices"),
        ("expandWildcards", "expand_wildcards"),
        ("minScore", "min_score"),
        ("analyzeWildcard", "analyze_wildcard"),
        ("defaultOperator", "default_operator"),
        ("terminateAfter", "terminate_after"),
    ],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/search-count.html",
};

pub static SCROLL: Endpoint = Endpoint {
    name: "scroll",
    method: MethodRule::ByBody,
    paths: &[
        PathTemplate::new(&[Lit("_search"), Lit("scroll"), Param("scroll_id")]),
        PathTemplate::new(&[Lit("_search"), Lit("scroll")]),
    ],
    required: &[],
    body: BodyRule::Optional,
    accepted_query: &["scroll", "rest_total_hits_as_int"],
    aliases: &[("restTotalHitsAsInt", "rest_total_hits_as_int")],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/scroll-api.html",
};

pub static CLEAR_SCROLL: Endpoint = Endpoint {
    name: "clear_scroll",
    method: MethodRule::Fixed(Method::Delete),
    paths: &[
        PathTemplate::new(&[Lit("_search"), Lit("scroll"), Param("scroll_id")]),
        PathTemplate::new(&[Lit("_search"), Lit("scroll")]),
    ],
    required: &[],
    body: BodyRule::Optional,
    accepted_query: &[],
    aliases: &[],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/clear-scroll-api.html",
};

pub static MSEARCH: Endpoint = Endpoint {
    name: "msearch",
    method: MethodRule::OneOf(&[Method::Get, Method::Post]),
    paths: &[
        PathTemplate::new(&[Param("index"), Param("type"), Lit("_msearch")]),
        PathTemplate::new(&[Param("index"), Lit("_msearch")]),
        PathTemplate::new(&[Lit("_msearch")]),
    ],
    required: &[],
    body: BodyRule::Bulk,
    accepted_query: &[
        "search_type",
        "max_concurrent_searches",
        "typed_keys",
        "pre_filter_shard_size",
        "max_concurrent_shard_requests",
        "rest_total_hits_as_int",
        "ccs_minimize_roundtrips",
    ],
    aliases: &[
        ("searchType", "search_type"),
        ("maxConcurrentSearches", "max_concurrent_searches"),
        ("typedKeys", "typed_keys"),
        ("preFilterShardSize", "pre_filter_shard_size"),
        ("maxConcurrentShardRequests", "max_concurrent_shard_requests"),
        ("restTotalHitsAsInt", "rest_total_hits_as_int"),
        ("ccsMinimizeRoundtrips", "ccs_minimize_roundtrips"),
    ],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/search-multi-search.html",
};

pub static BULK: Endpoint = Endpoint {
    name: "bulk",
    method: MethodRule::Fixed(Method::Post),
    paths: &[
        PathTemplate::new(&[Param("index"), Lit("_bulk")]),
        PathTemplate::new(&[Lit("_bulk")]),
    ],
    required: &[],
    body: BodyRule::Bulk,
    accepted_query: &[
        "wait_for_active_shards",
        "refresh",
        "routing",
        "timeout",
        "pipeline",
        "require_alias",
        "_source",
        "_source_excludes",
        "_source_includes",
    ],
    aliases: &[
        ("waitForActiveShards", "wait_for_active_shards"),
        ("requireAlias", "require_alias"),
        ("_sourceExcludes", "_source_excludes"),
        ("_sourceIncludes", "_source_includes"),
    ],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-bulk.html",
};

pub static INDEX: Endpoint = Endpoint {
    name: "index",
    method: MethodRule::ByPath,
    paths: &[
        PathTemplate::with_method(&[Param("index"), Lit("_doc"), Param("id")], Method::Put),
        PathTemplate::with_method(&[Param("index"), Lit("_doc")], Method::Post),
    ],
    required: &["index"],
    body: BodyRule::Required,
    accepted_query: DOC_QUERY,
    aliases: DOC_ALIASES,
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-index_.html",
};

pub static GET: Endpoint = Endpoint {
    name: "get",
    method: MethodRule::Fixed(Method::Get),
    paths: &[PathTemplate::new(&[Param("index"), Lit("_doc"), Param("id")])],
    required: &["index", "id"],
    body: BodyRule::Forbidden,
    accepted_query: DOC_QUERY,
    aliases: DOC_ALIASES,
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-get.html",
};

pub static DELETE: Endpoint = Endpoint {
    name: "delete",
    method: MethodRule::Fixed(Method::Delete),
    paths: &[PathTemplate::new(&[Param("index"), Lit("_doc"), Param("id")])],
    required: &["index", "id"],
    body: BodyRule::Forbidden,
    accepted_query: DOC_QUERY,
    aliases: DOC_ALIASES,
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-delete.html",
};

pub static INDICES_CREATE: Endpoint = Endpoint {
    name: "indices.create",
    method: MethodRule::Fixed(Method::Put),
    paths: &[PathTemplate::new(&[Param("index")])],
    required: &["index"],
    body: BodyRule::Optional,
    accepted_query: INDICES_QUERY,
    aliases: INDICES_ALIASES,
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/indices-create-index.html",
};

pub static INDICES_DELETE: Endpoint = Endpoint {
    name: "indices.delete",
    method: MethodRule::Fixed(Method::Delete),
    paths: &[PathTemplate::new(&[Param("index")])],
    required: &["index"],
    body: BodyRule::Forbidden,
    accepted_query: INDICES_QUERY,
    aliases: INDICES_ALIASES,
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/indices-delete-index.html",
};

pub static INDICES_EXISTS: Endpoint = Endpoint {
    name: "indices.exists",
    method: MethodRule::Fixed(Method::Head),
    paths: &[PathTemplate::new(&[Param("index")])],
    required: &["index"],
    body: BodyRule::Forbidden,
    accepted_query: INDICES_QUERY,
    aliases: INDICES_ALIASES,
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/indices-exists.html",
};

pub static ASYNC_SEARCH_SUBMIT: Endpoint = Endpoint {
    name: "async_search.submit",
    method: MethodRule::Fixed(Method::Post),
    paths: &[
        PathTemplate::new(&[Param("index"), Lit("_async_search")]),
        PathTemplate::new(&[Lit("_async_search")]),
    ],
    required: &[],
    body: BodyRule::Optional,
    accepted_query: &[
        "wait_for_completion_timeout",
        "keep_on_completion",
        "keep_alive",
        "batched_reduce_size",
        "request_cache",
        "analyzer",
        "analyze_wildcard",
        "default_operator",
        "df",
        "ignore_throttled",
        "ignore_unavailable",
        "lenient",
        "preference",
        "q",
        "routing",
        "search_type",
        "typed_keys",
    ],
    aliases: &[
        ("waitForCompletionTimeout", "wait_for_completion_timeout"),
        ("keepOnCompletion", "keep_on_completion"),
        ("keepAlive", "keep_alive"),
        ("batchedReduceSize", "batched_reduce_size"),
        ("requestCache", "request_cache"),
        ("analyzeWildcard", "analyze_wildcard"),
        ("defaultOperator", "default_operator"),
        ("ignoreThrottled", "ignore_throttled"),
        ("ignoreUnavailable", "ignore_unavailable"),
        ("searchType", "search_type"),
        ("typedKeys", "typed_keys"),
    ],
    accepted_body: SEARCH_BODY,
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/async-search.html",
};

pub static ASYNC_SEARCH_GET: Endpoint = Endpoint {
    name: "async_search.get",
    method: MethodRule::Fixed(Method::Get),
    paths: &[PathTemplate::new(&[Lit("_async_search"), Param("id")])],
    required: &["id"],
    body: BodyRule::Forbidden,
    accepted_query: &["keep_alive", "typed_keys", "wait_for_completion_timeout"],
    aliases: &[
        ("keepAlive", "keep_alive"),
        ("typedKeys", "typed_keys"),
        ("waitForCompletionTimeout", "wait_for_completion_timeout"),
    ],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/async-search.html",
};

pub static ASYNC_SEARCH_STATUS: Endpoint = Endpoint {
    name: "async_search.status",
    method: MethodRule::Fixed(Method::Get),
    paths: &[PathTemplate::new(&[Lit("_async_search"), Lit("status"), Param("id")])],
    required: &["id"],
    body: BodyRule::Forbidden,
    accepted_query: &[],
    aliases: &[],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/async-search.html",
};

pub static ASYNC_SEARCH_DELETE: Endpoint = Endpoint {
    name: "async_search.delete",
    method: MethodRule::Fixed(Method::Delete),
    paths: &[PathTemplate::new(&[Lit("_async_search"), Param("id")])],
    required: &["id"],
    body: BodyRule::Forbidden,
    accepted_query: &[],
    aliases: &[],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/async-search.html",
};

pub static ML_GET_RECORDS: Endpoint = Endpoint {
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
    accepted_query: &[
        "exclude_interim",
        "from",
        "size",
        "start",
        "end",
        "record_score",
        "sort",
        "desc",
    ],
    aliases: &[("excludeInterim", "exclude_interim"), ("recordScore", "record_score")],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/ml-get-record.html",
};

pub static SECURITY_GET_USER: Endpoint = Endpoint {
    name: "security.get_user",
    method: MethodRule::Fixed(Method::Get),
    paths: &[
        PathTemplate::new(&[Lit("_security"), Lit("user"), Param("username")]),
        PathTemplate::new(&[Lit("_security"), Lit("user")]),
    ],
    required: &[],
    body: BodyRule::Forbidden,
    accepted_query: &[],
    aliases: &[],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/security-api-get-user.html",
};

pub static MIGRATION_DEPRECATIONS: Endpoint = Endpoint {
    name: "migration.deprecations",
    method: MethodRule::Fixed(Method::Get),
    paths: &[
        PathTemplate::new(&[Param("index"), Lit("_migration"), Lit("deprecations")]),
        PathTemplate::new(&[Lit("_migration"), Lit("deprecations")]),
    ],
    required: &[],
    body: BodyRule::Forbidden,
    accepted_query: &[],
    aliases: &[],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/migration-api-deprecation.html",
};

pub static MIGRATION_GET_FEATURE_UPGRADE_STATUS: Endpoint = Endpoint {
    name: "migration.get_feature_upgrade_status",
    method: MethodRule::Fixed(Method::Get),
    paths: &[PathTemplate::new(&[Lit("_migration"), Lit("system_features")])],
    required: &[],
    body: BodyRule::Forbidden,
    accepted_query: &[],
    aliases: &[],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/migration-api-feature-upgrade.html",
};

pub static MIGRATION_POST_FEATURE_UPGRADE: Endpoint = Endpoint {
    name: "migration.post_feature_upgrade",
    method: MethodRule::Fixed(Method::Post),
    paths: &[PathTemplate::new(&[Lit("_migration"), Lit("system_features")])],
    required: &[],
    body: BodyRule::Forbidden,
    accepted_query: &[],
    aliases: &[],
    accepted_body: &[],
    documentation: "https://www.elastic.co/guide/en/elasticsearch/reference/current/migration-api-feature-upgrade.html",
};

/// Every endpoint, in display order.
static ALL: &[&Endpoint] = &[
    &INFO,
    &PING,
    &SEARCH,
    &COUNT,
    &SCROLL,
    &CLEAR_SCROLL,
    &MSEARCH,
    &BULK,
    &INDEX,
    &GET,
    &DELETE,
    &INDICES_CREATE,
    &INDICES_DELETE,
    &INDICES_EXISTS,
    &ASYNC_SEARCH_SUBMIT,
    &ASYNC_SEARCH_GET,
    &ASYNC_SEARCH_STATUS,
    &ASYNC_SEARCH_DELETE,
    &ML_GET_RECORDS,
    &SECURITY_GET_USER,
    &MIGRATION_DEPRECATIONS,
    &MIGRATION_GET_FEATURE_UPGRADE_STATUS,
    &MIGRATION_POST_FEATURE_UPGRADE,
];

static BY_NAME: Lazy<HashMap<&'static str, &'static Endpoint>> =
    Lazy::new(|| ALL.iter().map(|endpoint| (endpoint.name, *endpoint)).collect());

/// Returns every endpoint in the catalog.
pub fn all() -> &'static [&'static Endpoint] {
    ALL
}

/// Looks up an endpoint by its dotted name.
///
/// # Example
///
/// ```rust
/// use esclient::api::catalog;
///
/// assert_eq!(catalog::find("async_search.get").unwrap().name, "async_search.get");
/// assert!(catalog::find("nope").is_err());
/// ```
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] with `Unknown API: <name>` when the
/// name is not in the catalog.
pub fn find(name: &str) -> Result<&'static Endpoint, ApiError> {
    BY_NAME
        .get(name)
        .copied()
        .ok_or_else(|| ApiError::configuration(format!("Unknown API: {}", name)))
}

/// Returns the endpoints whose name contains `filter`.
pub fn matching(filter: &str) -> impl Iterator<Item = &'static Endpoint> + '_ {
    ALL.iter().copied().filter(move |endpoint| endpoint.name.contains(filter))
}
