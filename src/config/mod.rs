//
//  esclient
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads and saves the `esc` configuration file and turns it into an
//! [`HttpTransport`].
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/esc/config.toml`
//! - **macOS**: `~/Library/Application Support/esc/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\esc\config.toml`
//!
//! The `--config` flag (or `ESC_CONFIG`) points at a different file.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [client]
//! node = "https://search.example.com:9200"
//! request_timeout = 30
//! max_retries = 3
//!
//! [client.headers]
//! x-opaque-id = "esc"
//!
//! [auth]
//! username = "elastic"
//! password = "changeme"
//! ```
//!
//! ## Keys
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `node` | Node URL |
//! | `request_timeout` | Default timeout in seconds |
//! | `max_retries` | Retries on connection errors |
//! | `headers.<name>` | Header sent with every request |
//! | `auth.username`, `auth.password` | Basic credentials |
//! | `auth.api_key`, `auth.api_key_id` | API key (encoded, or id + secret) |
//! | `auth.bearer` | Bearer token |

mod file;

pub use file::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::http::DEFAULT_NODE;
use crate::api::HttpTransport;
use crate::auth::AuthCredential;

/// Value shown in place of secrets when listing the configuration.
const MASK: &str = "********";

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Credentials.
    #[serde(default, skip_serializing_if = "AuthConfig::is_empty")]
    pub auth: AuthConfig,
}

/// The `[client]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Node URL.
    #[serde(default = "default_node")]
    pub node: String,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,

    /// Retries on connection errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,

    /// Headers sent with every request.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

fn default_node() -> String {
    DEFAULT_NODE.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node: default_node(),
            request_timeout: None,
            max_retries: None,
            headers: BTreeMap::new(),
        }
    }
}

/// The `[auth]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer: Option<String>,
}

impl AuthConfig {
    /// Returns `true` when no credential field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Resolves the configured credential.
    ///
    /// An API key takes precedence over a bearer token, which takes
    /// precedence over basic credentials.
    ///
    /// # Errors
    ///
    /// Fails when `api_key_id` is set without `api_key`, or a username is set
    /// without a password.
    pub fn credential(&self) -> Result<Option<AuthCredential>> {
        if let Some(key) = &self.api_key {
            return Ok(Some(match &self.api_key_id {
                Some(id) => AuthCredential::api_key_pair(id, key),
                None => AuthCredential::api_key(key),
            }));
        }
        if self.api_key_id.is_some() {
            bail!("auth.api_key_id is set but auth.api_key is missing");
        }
        if let Some(token) = &self.bearer {
            return Ok(Some(AuthCredential::bearer(token)));
        }
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Ok(Some(AuthCredential::basic(user, pass))),
            (Some(_), None) => bail!("auth.username is set but auth.password is missing"),
            _ => Ok(None),
        }
    }
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Default configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Reads a value by dotted key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use esclient::Config;
    ///
    /// let mut config = Config::default();
    /// config.set("max_retries", "3")?;
    /// config.set("headers.x-opaque-id", "nightly")?;
    ///
    /// assert_eq!(config.get("max_retries"), Some("3".to_string()));
    /// assert_eq!(config.get("headers.x-opaque-id"), Some("nightly".to_string()));
    /// assert_eq!(config.get("node"), Some("http://localhost:9200".to_string()));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(name) = key.strip_prefix("headers.") {
            return self.client.headers.get(name).cloned();
        }
        match key {
            "node" => Some(self.client.node.clone()),
            "request_timeout" => self.client.request_timeout.map(|v| v.to_string()),
            "max_retries" => self.client.max_retries.map(|v| v.to_string()),
            "auth.username" => self.auth.username.clone(),
            "auth.password" => self.auth.password.clone(),
            "auth.api_key" => self.auth.api_key.clone(),
            "auth.api_key_id" => self.auth.api_key_id.clone(),
            "auth.bearer" => self.auth.bearer.clone(),
            _ => None,
        }
    }

    /// Sets a value by dotted key.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and for values of the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(name) = key.strip_prefix("headers.") {
            if name.is_empty() {
                bail!("Header name must not be empty");
            }
            self.client.headers.insert(name.to_string(), value.to_string());
            return Ok(());
        }
        match key {
            "node" => {
                HttpTransport::new(value)?;
                self.client.node = value.to_string();
            }
            "request_timeout" => {
                self.client.request_timeout = Some(
                    value
                        .parse()
                        .with_context(|| format!("request_timeout must be a number of seconds, got '{}'", value))?,
                )
            }
            "max_retries" => {
                self.client.max_retries = Some(
                    value
                        .parse()
                        .with_context(|| format!("max_retries must be a non-negative integer, got '{}'", value))?,
                )
            }
            "auth.username" => self.auth.username = Some(value.to_string()),
            "auth.password" => self.auth.password = Some(value.to_string()),
            "auth.api_key" => self.auth.api_key = Some(value.to_string()),
            "auth.api_key_id" => self.auth.api_key_id = Some(value.to_string()),
            "auth.bearer" => self.auth.bearer = Some(value.to_string()),
            _ => bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }

    /// Removes a value by dotted key, restoring its default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        if let Some(name) = key.strip_prefix("headers.") {
            self.client.headers.remove(name);
            return Ok(());
        }
        match key {
            "node" => self.client.node = default_node(),
            "request_timeout" => self.client.request_timeout = None,
            "max_retries" => self.client.max_retries = None,
            "auth.username" => self.auth.username = None,
            "auth.password" => self.auth.password = None,
            "auth.api_key" => self.auth.api_key = None,
            "auth.api_key_id" => self.auth.api_key_id = None,
            "auth.bearer" => self.auth.bearer = None,
            _ => bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }

    /// Lists every set key with its value; secrets are masked.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = vec![("node".to_string(), self.client.node.clone())];
        for key in ["request_timeout", "max_retries"] {
            if let Some(value) = self.get(key) {
                entries.push((key.to_string(), value));
            }
        }
        for (name, value) in &self.client.headers {
            entries.push((format!("headers.{}", name), value.clone()));
        }
        for key in ["auth.username", "auth.password", "auth.api_key", "auth.api_key_id", "auth.bearer"] {
            if let Some(value) = self.get(key) {
                let shown = if matches!(key, "auth.password" | "auth.api_key" | "auth.bearer") {
                    MASK.to_string()
                } else {
                    value
                };
                entries.push((key.to_string(), shown));
            }
        }
        entries
    }

    /// Builds the HTTP transport described by this configuration.
    ///
    /// # Parameters
    ///
    /// * `node` - Overrides `client.node` when given (`--node` / `ESC_NODE`)
    pub fn transport(&self, node: Option<&str>) -> Result<HttpTransport> {
        let node = node.unwrap_or(&self.client.node);
        let mut transport = HttpTransport::new(node)?;

        if let Some(secs) = self.client.request_timeout {
            transport = transport.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = self.client.max_retries {
            transport = transport.with_max_retries(retries);
        }
        for (name, value) in &self.client.headers {
            transport = transport.with_header(name, value);
        }
        if let Some(credential) = self.auth.credential()? {
            transport = transport.with_auth(credential);
        }

        Ok(transport)
    }
}
