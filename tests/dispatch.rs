//
//  esclient
//  tests/dispatch.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Client behavior against an in-memory transport.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::oneshot;

use esclient::api::{
    catalog, ApiError, ApiResponse, CallArgs, Client, Method, Params, QueryValue, RequestBody,
    RequestDescriptor, RequestOptions, Transport, TransportResult,
};

/// Records every call and answers with a fixed body.
#[derive(Default)]
struct Recording {
    calls: Mutex<Vec<(RequestDescriptor, RequestOptions)>>,
    delay: Option<Duration>,
}

impl Recording {
    fn calls(&self) -> Vec<(RequestDescriptor, RequestOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for Recording {
    async fn request(
        &self,
        request: RequestDescriptor,
        options: RequestOptions,
    ) -> Result<TransportResult, ApiError> {
        self.calls.lock().unwrap().push((request.clone(), options.clone()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut result = TransportResult::new(200, json!({"acknowledged": true}));
        result.warnings = options.warnings;
        Ok(result)
    }
}

/// Answers every call with a server error.
struct Failing;

#[async_trait]
impl Transport for Failing {
    async fn request(&self, _: RequestDescriptor, _: RequestOptions) -> Result<TransportResult, ApiError> {
        Err(ApiError::Response {
            status: 503,
            body: json!({"error": "unavailable"}),
        })
    }
}

fn client() -> (Client, Arc<Recording>) {
    let transport = Arc::new(Recording::default());
    (Client::from_arc(transport.clone()), transport)
}

#[tokio::test]
async fn test_missing_required_parameter_never_reaches_transport() {
    let (client, transport) = client();

    let err = client
        .perform(&catalog::ML_GET_RECORDS, Params::new().set("excludeInterim", true))
        .await
        .unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "Configuration error: Missing required parameter: job_id or jobId"
    );
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_body_on_bodyless_endpoint_never_reaches_transport() {
    let (client, transport) = client();

    let err = client
        .perform(&catalog::GET, Params::new().set("index", "a").set("id", "1").body(json!({})))
        .await
        .unwrap_err();

    assert!(err.is_configuration());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_ml_records_request_is_built_and_forwarded_once() {
    let (client, transport) = client();

    let response = client
        .perform(
            &catalog::ML_GET_RECORDS,
            Params::new()
                .set("jobId", "high-cpu")
                .set("excludeInterim", true)
                .set("size", 10),
        )
        .await
        .unwrap();

    assert_eq!(response, ApiResponse::Body(json!({"acknowledged": true})));

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    let (request, options) = &calls[0];
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, "/_ml/anomaly_detectors/high-cpu/results/records");
    assert_eq!(
        request.querystring.get("exclude_interim"),
        Some(&QueryValue::Single("true".to_string()))
    );
    assert_eq!(
        request.querystring.get("size"),
        Some(&QueryValue::Single("10".to_string()))
    );
    assert_eq!(options.warnings, None);
}

#[tokio::test]
async fn test_body_switches_method_to_post() {
    let (client, transport) = client();

    client
        .perform(
            &catalog::SEARCH,
            Params::new().set("index", "logs").body(json!({"query": {"match_all": {}}})),
        )
        .await
        .unwrap();

    let (request, _) = &transport.calls()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/logs/_search");
    assert_eq!(
        request.body,
        Some(RequestBody::Json(json!({"query": {"match_all": {}}})))
    );
}

#[tokio::test]
async fn test_unknown_parameters_become_warnings() {
    let (client, transport) = client();

    let response = client
        .perform(
            &catalog::COUNT,
            (
                Params::new().set("index", "logs").set("madeUp", "x"),
                RequestOptions::new().meta(true),
            ),
        )
        .await
        .unwrap();

    let (request, options) = &transport.calls()[0];
    assert_eq!(
        request.querystring.get("madeUp"),
        Some(&QueryValue::Single("x".to_string()))
    );
    let warnings = options.warnings.clone().unwrap();
    assert_eq!(
        warnings,
        vec!["Client - Unknown parameter: \"madeUp\", sending it as query parameter".to_string()]
    );

    let full = response.full().unwrap();
    assert_eq!(full.status_code, 200);
    assert_eq!(full.warnings.as_ref(), Some(&warnings));
}

#[tokio::test]
async fn test_options_reach_transport_unchanged() {
    let (client, transport) = client();
    let options = RequestOptions::new()
        .ignore(404)
        .header("x-opaque-id", "job-7")
        .max_retries(2);

    client
        .perform(&catalog::INFO, (Params::new(), options.clone()))
        .await
        .unwrap();

    let (_, seen) = &transport.calls()[0];
    assert_eq!(seen, &options);
}

#[tokio::test]
async fn test_call_by_name() {
    let (client, transport) = client();

    client
        .call("async_search.status", Params::new().set("id", "FmRld"))
        .await
        .unwrap();
    let err = client.call("no_such.api", ()).await.unwrap_err();

    assert_eq!(err.to_string(), "Configuration error: Unknown API: no_such.api");
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.path, "/_async_search/status/FmRld");
}

#[tokio::test]
async fn test_transport_errors_pass_through() {
    let client = Client::new(Failing);

    let err = client.perform(&catalog::INFO, ()).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(matches!(err, ApiError::Response { body, .. } if body["error"] == "unavailable"));
}

#[tokio::test]
async fn test_callback_receives_configuration_error_immediately() {
    let (client, transport) = client();
    let seen = Arc::new(Mutex::new(None));
    let slot = seen.clone();

    let handle = client.perform_with_callback(&catalog::GET, Params::new().set("index", "a"), move |result| {
        *slot.lock().unwrap() = Some(result.map(ApiResponse::into_body));
    });

    assert!(handle.is_finished());
    let result = seen.lock().unwrap().take().unwrap();
    assert!(result.unwrap_err().is_configuration());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_callback_receives_response() {
    let (client, _) = client();
    let (tx, rx) = oneshot::channel();

    let handle = client.call_with_callback("info", CallArgs::default(), move |result| {
        let _ = tx.send(result);
    });

    assert!(handle.wait().await);
    let body = rx.await.unwrap().unwrap().into_body();
    assert_eq!(body["acknowledged"], true);
}

#[tokio::test]
async fn test_aborted_call_never_invokes_callback() {
    let transport = Arc::new(Recording {
        delay: Some(Duration::from_secs(30)),
        ..Recording::default()
    });
    let client = Client::from_arc(transport.clone());
    let invoked = Arc::new(Mutex::new(false));
    let flag = invoked.clone();

    let handle = client.perform_with_callback(&catalog::INFO, (), move |_| {
        *flag.lock().unwrap() = true;
    });
    tokio::task::yield_now().await;
    handle.abort();

    assert!(!handle.wait().await);
    assert!(!*invoked.lock().unwrap());
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let (client, transport) = client();

    let calls = (0..8).map(|i| {
        let client = client.clone();
        async move {
            client
                .perform(&catalog::GET, Params::new().set("index", "logs").set("id", i))
                .await
        }
    });
    let results = spawn_all(calls).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(transport.calls().len(), 8);
}

async fn spawn_all<F, T>(futures: impl IntoIterator<Item = F>) -> Vec<T>
where
    F: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handles: Vec<_> = futures.into_iter().map(tokio::spawn).collect();
    let mut out = Vec::with_capacity(handles.len());
    for handle in handles {
        out.push(handle.await.unwrap());
    }
    out
}
