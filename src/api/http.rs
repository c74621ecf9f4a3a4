//
//  esclient
//  api/http.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Single-node HTTP transport
//!
//! [`HttpTransport`] executes request descriptors against one node with
//! `reqwest`. It is what the `esc` binary uses; applications with several
//! nodes, sniffing or pooling needs plug in their own [`Transport`].
//!
//! ## Behaviour
//!
//! | Concern | Handling |
//! |---------|----------|
//! | URL | node URL path + descriptor path, querystring with lists joined by `,` |
//! | Body | JSON (`application/json`) or NDJSON (`application/x-ndjson`) |
//! | Timeout | `options.request_timeout`, else the transport default |
//! | Headers | transport defaults, then `options.headers` |
//! | Retries | connection errors and timeouts, up to `max_retries` extra attempts |
//! | `HEAD` | body is `true`/`false`; 404 is not an error |
//! | Errors | 4xx/5xx not listed in `options.ignore` become [`ApiError::Response`] |
//! | Warnings | server `Warning` headers are appended to the request warnings |

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use super::error::ApiError;
use super::options::RequestOptions;
use super::request::{Method, RequestDescriptor};
use super::transport::{ResponseMeta, Transport, TransportResult};
use crate::auth::AuthCredential;

/// Default node when none is configured.
pub const DEFAULT_NODE: &str = "http://localhost:9200";

/// reqwest-backed transport for a single node.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use esclient::api::HttpTransport;
/// use esclient::auth::AuthCredential;
///
/// let transport = HttpTransport::new("https://search.example.com:9200")?
///     .with_auth(AuthCredential::basic("elastic", "changeme"))
///     .with_request_timeout(Duration::from_secs(10))
///     .with_max_retries(2);
/// # Ok::<(), esclient::api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// The underlying HTTP client
    http: Client,
    /// Node base URL, possibly with a path prefix
    node: Url,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
    /// Headers sent with every request
    headers: BTreeMap<String, String>,
    /// Timeout used when the options bag has none
    request_timeout: Option<Duration>,
    /// Retry budget used when the options bag has none
    max_retries: u32,
}

impl HttpTransport {
    /// Creates a transport for `node`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if `node` is not an absolute
    /// `http`/`https` URL, or [`ApiError::Network`] if the HTTP client cannot
    /// be created.
    pub fn new(node: &str) -> Result<Self, ApiError> {
        let node = Url::parse(node)
            .map_err(|err| ApiError::configuration(format!("Invalid node URL '{}': {}", node, err)))?;
        if !matches!(node.scheme(), "http" | "https") {
            return Err(ApiError::configuration(format!(
                "Unsupported node URL scheme: {}",
                node.scheme()
            )));
        }

        Ok(Self {
            http: Client::builder()
                .user_agent(format!("esc/{}", crate::VERSION))
                .build()?,
            node,
            auth: None,
            headers: BTreeMap::new(),
            request_timeout: None,
            max_retries: 0,
        })
    }

    /// Sets the authentication credentials.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Adds a header sent with every request.
    ///
    /// Names are case-insensitive; a header of the same name in the options
    /// bag replaces this one for that request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Sets the default request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the default retry budget.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Returns the node URL.
    pub fn node(&self) -> &Url {
        &self.node
    }

    /// Returns the full URL for a request descriptor.
    ///
    /// # Example
    ///
    /// ```rust
    /// use esclient::api::{HttpTransport, Method, QueryValue, RequestDescriptor};
    ///
    /// let transport = HttpTransport::new("http://localhost:9200/es/")?;
    /// let mut request = RequestDescriptor::new(Method::Get, "/logs/_search");
    /// request.querystring.insert("size".into(), QueryValue::Single("5".into()));
    ///
    /// assert_eq!(
    ///     transport.url_for(&request).as_str(),
    ///     "http://localhost:9200/es/logs/_search?size=5"
    /// );
    /// # Ok::<(), esclient::api::ApiError>(())
    /// ```
    pub fn url_for(&self, request: &RequestDescriptor) -> Url {
        let mut url = self.node.clone();
        let base = self.node.path().trim_end_matches('/');
        url.set_path(&format!("{}{}", base, request.path));
        url.set_query(None);

        if !request.querystring.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in request.query_pairs() {
                pairs.append_pair(&key, &value);
            }
        }

        url
    }

    /// Transport defaults overlaid with the per-request headers, keyed by
    /// lower-cased name so each header is sent once.
    fn request_headers(&self, options: &RequestOptions) -> BTreeMap<String, String> {
        let mut headers = self.headers.clone();
        for (name, value) in options.headers.iter().flatten() {
            headers.insert(name.to_ascii_lowercase(), value.clone());
        }
        headers
    }

    async fn send_once(
        &self,
        request: &RequestDescriptor,
        url: Url,
        body: Option<&(Vec<u8>, &'static str)>,
        options: &RequestOptions,
    ) -> Result<Response, reqwest::Error> {
        let mut builder = self.http.request(request.method.into(), url);

        if let Some(timeout) = options.request_timeout.or(self.request_timeout) {
            builder = builder.timeout(timeout);
        }
        for (name, value) in self.request_headers(options) {
            builder = builder.header(name, value);
        }
        if let Some((bytes, content_type)) = body {
            builder = builder.header(CONTENT_TYPE, *content_type).body(bytes.clone());
        }
        if let Some(auth) = &self.auth {
            builder = auth.apply_to_request(builder);
        }

        builder.send().await
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        request: RequestDescriptor,
        options: RequestOptions,
    ) -> Result<TransportResult, ApiError> {
        let url = self.url_for(&request);
        let body = match &request.body {
            Some(body) => Some((body.to_bytes()?, body.content_type())),
            None => None,
        };
        let retries = options.max_retries.unwrap_or(self.max_retries);

        let mut attempts = 0u32;
        let response = loop {
            attempts += 1;
            trace!(method = %request.method, url = %url, attempt = attempts, "sending request");
            match self.send_once(&request, url.clone(), body.as_ref(), &options).await {
                Ok(response) => break response,
                Err(err) if (err.is_connect() || err.is_timeout()) && attempts <= retries => {
                    warn!(attempt = attempts, error = %err, "request failed, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        };

        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let mut warnings = options.warnings.clone();
        let server_warnings: Vec<String> = response
            .headers()
            .get_all("warning")
            .iter()
            .filter_map(|value| value.to_str().ok().map(str::to_string))
            .collect();
        if !server_warnings.is_empty() {
            warnings.get_or_insert_with(Vec::new).extend(server_warnings);
        }

        let is_head = request.method == Method::Head;
        let body = if is_head {
            Value::Bool(response.status().is_success())
        } else {
            decode_body(&response.text().await?)
        };

        debug!(status, attempts, path = %request.path, "response received");

        let ignored = options.ignores(status) || (is_head && status == 404);
        if status >= 400 && !ignored {
            return Err(ApiError::Response { status, body });
        }

        Ok(TransportResult {
            body,
            status_code: status,
            headers,
            warnings,
            meta: ResponseMeta {
                attempts,
                method: Some(request.method),
                path: request.path,
            },
        })
    }
}

/// Parses a response payload as JSON, falling back to a string.
fn decode_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::QueryValue;
    use serde_json::json;

    #[test]
    fn test_invalid_node_rejected() {
        assert!(HttpTransport::new("not a url").unwrap_err().is_configuration());
        assert!(HttpTransport::new("ftp://example.com").unwrap_err().is_configuration());
    }

    #[test]
    fn test_url_keeps_encoded_segments() {
        let transport = HttpTransport::new("http://localhost:9200").unwrap();
        let request = RequestDescriptor::new(Method::Get, "/logs%2F2024/_count");
        assert_eq!(
            transport.url_for(&request).as_str(),
            "http://localhost:9200/logs%2F2024/_count"
        );
    }

    #[test]
    fn test_url_joins_list_values() {
        let transport = HttpTransport::new("http://localhost:9200").unwrap();
        let mut request = RequestDescriptor::new(Method::Get, "/_search");
        request.querystring.insert(
            "expand_wildcards".to_string(),
            QueryValue::List(vec!["open".to_string(), "hidden".to_string()]),
        );
        assert_eq!(
            transport.url_for(&request).as_str(),
            "http://localhost:9200/_search?expand_wildcards=open%2Chidden"
        );
    }

    #[test]
    fn test_request_headers_override_defaults() {
        let transport = HttpTransport::new("http://localhost:9200")
            .unwrap()
            .with_header("X-Opaque-Id", "default")
            .with_header("x-tenant", "blue");
        let options = RequestOptions::new().header("x-opaque-id", "per-request");

        let headers = transport.request_headers(&options);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["x-opaque-id"], "per-request");
        assert_eq!(headers["x-tenant"], "blue");

        let defaults = transport.request_headers(&RequestOptions::new());
        assert_eq!(defaults["x-opaque-id"], "default");
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body("{\"a\":1}"), json!({"a": 1}));
        assert_eq!(decode_body("green"), json!("green"));
    }
}
