//
//  esclient
//  cli/endpoints.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `esc endpoints`: list the endpoint catalog.
//!
//! ```bash
//! esc endpoints
//! esc endpoints async_search -o table
//! ```

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use crate::api::endpoint::{BodyRule, Endpoint, MethodRule};
use crate::api::{catalog, Method};
use crate::output::{TableBuilder, TableOutput};

use super::GlobalOptions;

/// List the endpoints in the catalog
#[derive(Args, Debug)]
pub struct EndpointsCommand {
    /// Only show endpoints whose name contains this text
    pub filter: Option<String>,
}

/// One catalog entry as displayed.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointRow {
    pub name: &'static str,
    pub method: String,
    pub paths: Vec<String>,
    pub required: Vec<&'static str>,
    pub body: &'static str,
    pub documentation: &'static str,
}

impl From<&Endpoint> for EndpointRow {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            name: endpoint.name,
            method: describe_method(endpoint),
            paths: endpoint.paths.iter().map(|t| t.pattern()).collect(),
            required: endpoint.required.to_vec(),
            body: match endpoint.body {
                BodyRule::Forbidden => "none",
                BodyRule::Optional => "optional",
                BodyRule::Required => "required",
                BodyRule::Bulk => "ndjson",
            },
            documentation: endpoint.documentation,
        }
    }
}

/// The rows of one listing.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct EndpointList(pub Vec<EndpointRow>);

impl TableOutput for EndpointList {
    fn print_table(&self, color: bool) {
        let mut table = TableBuilder::new()
            .color(color)
            .headers(["NAME", "METHOD", "PATHS", "BODY"]);
        for row in &self.0 {
            table = table.row([
                row.name.to_string(),
                row.method.clone(),
                row.paths.join("\n"),
                row.body.to_string(),
            ]);
        }
        table.print();
    }
}

/// Human readable method rule, e.g. `GET/POST` for body-dependent endpoints.
fn describe_method(endpoint: &Endpoint) -> String {
    let join = |methods: &[Method]| {
        methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join("/")
    };
    match endpoint.method {
        MethodRule::Fixed(method) => method.to_string(),
        MethodRule::ByBody => join(&[Method::Get, Method::Post]),
        MethodRule::OneOf(allowed) => join(allowed),
        MethodRule::ByPath => {
            let methods: Vec<Method> = endpoint.paths.iter().filter_map(|t| t.method).collect();
            join(&methods)
        }
    }
}

impl EndpointsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let filter = self.filter.as_deref().unwrap_or("");
        let rows: Vec<EndpointRow> = catalog::matching(filter).map(EndpointRow::from).collect();

        if rows.is_empty() {
            bail!("No endpoints match '{}'", filter);
        }

        global.writer().write(&EndpointList(rows))
    }
}
