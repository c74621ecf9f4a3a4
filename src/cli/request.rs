//
//  esclient
//  cli/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `esc request`: build and send a request to a catalog endpoint.
//!
//! Parameters are given as `-p key=value` pairs (camelCase or snake_case),
//! the body inline, from a file, or from stdin. The request is validated and
//! mapped locally; `--dry-run` prints the result without any network I/O.
//!
//! ## Examples
//!
//! ```bash
//! # Count documents in an index
//! esc request count -p index=logs-2024 -p q=level:error
//!
//! # Search with a body from a file, treating 404 as success
//! esc request search -p index=logs --body query.json --ignore 404
//!
//! # Inspect what would be sent
//! esc request ml.get_records -p jobId=high-cpu -p excludeInterim=true --dry-run
//!
//! # Bulk from stdin (newline-delimited JSON)
//! cat actions.ndjson | esc request bulk -p index=logs --body -
//! ```

use std::fs;
use std::io::Read;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::api::endpoint::{BodyRule, Endpoint};
use crate::api::{catalog, Client, Params, RequestDescriptor, RequestOptions};

use super::GlobalOptions;

/// Build and send a request to a catalog endpoint
#[derive(Args, Debug)]
pub struct RequestCommand {
    /// Endpoint name (see `esc endpoints`), e.g. search, async_search.get
    pub endpoint: String,

    /// Request parameter (can be specified multiple times)
    #[arg(long = "param", short = 'p', value_name = "KEY=VALUE", action = clap::ArgAction::Append)]
    pub params: Vec<String>,

    /// All parameters as a JSON object (merged before --param)
    #[arg(long, value_name = "JSON")]
    pub params_json: Option<String>,

    /// Request body: inline JSON, a file path, or - for stdin
    #[arg(long, short = 'b', value_name = "BODY")]
    pub body: Option<String>,

    /// Extra header 'Name: Value' (can be specified multiple times)
    #[arg(long, short = 'H', action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Status code to treat as success (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append)]
    pub ignore: Vec<u16>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Retries on connection errors
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Request options as a JSON object (applied before the flags above)
    #[arg(long, value_name = "JSON")]
    pub options: Option<String>,

    /// Print status, headers, warnings and metadata along with the body
    #[arg(long)]
    pub meta: bool,

    /// Print the built request instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

/// What `--dry-run` prints.
#[derive(Debug, Serialize)]
struct DryRun<'a> {
    api: &'a str,
    url: String,
    request: &'a RequestDescriptor,
    options: &'a RequestOptions,
}

impl RequestCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let endpoint = catalog::find(&self.endpoint)?;
        let params = self.build_params(endpoint)?;
        let options = self.build_options()?;

        let (request, options) = Client::prepare(endpoint, (params, options))?;

        let writer = global.writer();
        for warning in options.warnings.iter().flatten() {
            writer.write_warning(warning);
        }

        let config = global.load_config()?;
        let transport = config.transport(global.node.as_deref())?;

        if self.dry_run {
            let preview = DryRun {
                api: endpoint.name,
                url: transport.url_for(&request).to_string(),
                request: &request,
                options: &options,
            };
            return writer.write_data(&preview);
        }

        let client = Client::new(transport);
        let response = client.dispatch(endpoint, request, options).await?;
        writer.write_data(&response)
    }

    fn build_params(&self, endpoint: &Endpoint) -> Result<Params> {
        let mut params = match &self.params_json {
            Some(json) => {
                let value: Value = serde_json::from_str(json).context("--params-json is not valid JSON")?;
                Params::from_value(value)?
            }
            None => Params::new(),
        };

        for param in &self.params {
            let (key, value) = parse_param(param)?;
            params.insert(key, value);
        }

        if let Some(source) = &self.body {
            let text = read_body_source(source, endpoint.body)?;
            params.insert("body", parse_body(&text, endpoint.body)?);
        }

        Ok(params)
    }

    fn build_options(&self) -> Result<RequestOptions> {
        let mut options = match &self.options {
            Some(json) => {
                let value: Value = serde_json::from_str(json).context("--options is not valid JSON")?;
                RequestOptions::try_from(value)?
            }
            None => RequestOptions::new(),
        };

        for status in &self.ignore {
            options = options.ignore(*status);
        }
        if let Some(secs) = self.timeout {
            options = options.request_timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = self.max_retries {
            options = options.max_retries(retries);
        }
        for header in &self.header {
            let (name, value) = parse_header(header)?;
            options = options.header(name, value);
        }
        if self.meta {
            options = options.meta(true);
        }

        Ok(options)
    }
}

/// Parses `key=value`, interpreting the value as JSON where it looks like a
/// literal (`true`, `5`, `["a","b"]`) and as a string otherwise.
fn parse_param(param: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = param.split_once('=') else {
        bail!("Invalid parameter format: {}. Expected key=value", param);
    };
    if key.is_empty() {
        bail!("Invalid parameter format: {}. Key must not be empty", param);
    }

    let value = match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ if raw.starts_with('[') || raw.starts_with('{') => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
        _ => match raw.parse::<i64>() {
            Ok(n) => Value::Number(n.into()),
            Err(_) => Value::String(raw.to_string()),
        },
    };

    Ok((key.to_string(), value))
}

/// Parses `Name: Value`.
fn parse_header(header: &str) -> Result<(String, String)> {
    match header.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("Invalid header format: {}. Expected 'Name: Value'", header),
    }
}

/// Reads `--body`: `-` is stdin, inline JSON (or multi-line NDJSON for
/// bulk endpoints) is taken as is, anything else must be a readable file.
fn read_body_source(source: &str, rule: BodyRule) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read body from stdin")?;
        return Ok(buffer);
    }

    let inline = serde_json::from_str::<Value>(source).is_ok()
        || (rule == BodyRule::Bulk && source.contains('\n'));
    if inline {
        return Ok(source.to_string());
    }

    fs::read_to_string(source).with_context(|| format!("Failed to read body file {}", source))
}

/// Parses body text for an endpoint.
///
/// Bulk endpoints take a JSON array of documents, or NDJSON text that the
/// builder splits into lines. A single-line action is NDJSON too.
fn parse_body(text: &str, rule: BodyRule) -> Result<Value> {
    if rule == BodyRule::Bulk {
        return Ok(match serde_json::from_str::<Value>(text) {
            Ok(lines @ Value::Array(_)) => lines,
            _ => Value::String(text.to_string()),
        });
    }
    serde_json::from_str(text).context("Body is not valid JSON")
}
