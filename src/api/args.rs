//
//  esclient
//  api/args.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Argument normalization for API calls.
//!
//! Callers may supply nothing, only parameters, or parameters together with
//! an options bag. Each shape converts into the same canonical [`CallArgs`]
//! pair, so the dispatcher only ever sees one form:
//!
//! | Call shape | Converts from |
//! |------------|---------------|
//! | no arguments | `()` or `None::<Params>` |
//! | parameters | `Params` or `Some(Params)` |
//! | parameters and options | `(Params, RequestOptions)` |
//! | untyped JSON | [`CallArgs::from_json`] |
//!
//! Whether the result is awaited or delivered to a callback is decided by
//! the [`Client`](super::Client) method used, not by the argument shape.
//! Callback-style calls hand back a [`RequestHandle`] for cancellation.

use serde_json::Value;
use tokio::task::JoinHandle;

use super::error::ApiError;
use super::options::RequestOptions;
use super::params::Params;

/// Canonical `(params, options)` pair of one call.
///
/// # Example
///
/// ```rust
/// use esclient::api::{CallArgs, Params, RequestOptions};
///
/// let bare: CallArgs = ().into();
/// let only_params: CallArgs = Params::new().set("index", "logs").into();
/// let both: CallArgs = (Params::new(), RequestOptions::new().ignore(404)).into();
///
/// assert!(bare.params.is_empty());
/// assert_eq!(only_params.options, RequestOptions::default());
/// assert_eq!(both.options.ignore, Some(vec![404]));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    /// User parameters.
    pub params: Params,
    /// Options bag.
    pub options: RequestOptions,
}

impl CallArgs {
    /// Creates a pair from its parts.
    pub fn new(params: Params, options: RequestOptions) -> Self {
        Self { params, options }
    }

    /// Normalizes untyped JSON arguments.
    ///
    /// `null` stands for an omitted argument. Parameters must be an object;
    /// options are validated by [`RequestOptions::try_from`], which rejects a
    /// `headers` entry that is not an object.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for malformed parameters or options.
    pub fn from_json(params: Value, options: Value) -> Result<Self, ApiError> {
        Ok(Self {
            params: Params::from_value(params)?,
            options: RequestOptions::try_from(options)?,
        })
    }

    /// Splits the pair.
    pub fn into_parts(self) -> (Params, RequestOptions) {
        (self.params, self.options)
    }
}

impl From<()> for CallArgs {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<Params> for CallArgs {
    fn from(params: Params) -> Self {
        Self {
            params,
            options: RequestOptions::default(),
        }
    }
}

impl From<Option<Params>> for CallArgs {
    fn from(params: Option<Params>) -> Self {
        params.map(Self::from).unwrap_or_default()
    }
}

impl From<(Params, RequestOptions)> for CallArgs {
    fn from((params, options): (Params, RequestOptions)) -> Self {
        Self { params, options }
    }
}

impl From<(Option<Params>, Option<RequestOptions>)> for CallArgs {
    fn from((params, options): (Option<Params>, Option<RequestOptions>)) -> Self {
        Self {
            params: params.unwrap_or_default(),
            options: options.unwrap_or_default(),
        }
    }
}

/// Cancellation handle for a callback-style call.
///
/// A handle for a call that failed validation is already finished: its
/// callback ran before the handle was returned and no task was spawned.
#[derive(Debug)]
pub struct RequestHandle {
    task: Option<JoinHandle<()>>,
}

impl RequestHandle {
    pub(crate) fn spawned(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    pub(crate) fn finished() -> Self {
        Self { task: None }
    }

    /// Cancels the in-flight request. The callback will not be invoked if
    /// the request had not completed yet.
    pub fn abort(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Returns `true` once the callback has run or the call was aborted.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits for the call to settle.
    ///
    /// Returns `false` only if the call was aborted. A callback that panicked
    /// still counts as having run.
    pub async fn wait(self) -> bool {
        match self.task {
            Some(task) => task.await.map_or_else(|err| !err.is_cancelled(), |_| true),
            None => true,
        }
    }
}
