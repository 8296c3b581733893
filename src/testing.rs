//! Test doubles shared by the unit and scenario tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    errors::ResponseBody,
    prelude::*,
    req::{HttpResponse, HttpTransport},
    wallet::LocalWallet,
    Error,
};

pub(crate) const TEST_PRIVATE_KEY: &str =
    "e908f86dbb4d55ac876378565aafeabc187f6690f046459397b17d9b9a19688e";

pub(crate) fn test_wallet() -> LocalWallet {
    LocalWallet::from_private_key(TEST_PRIVATE_KEY).unwrap()
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) url: String,
    pub(crate) body: String,
}

impl RecordedRequest {
    pub(crate) fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Scripted transport: replies in FIFO order and records every request.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push_json(&self, body: Value) {
        self.push(200, body.to_string());
    }

    pub(crate) fn push_text(&self, status: u16, body: &str) {
        self.push(status, body.to_string());
    }

    fn push(&self, status: u16, body: String) {
        self.responses
            .lock()
            .unwrap()
            .push_back(HttpResponse { status, body });
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Bodies of requests whose `type` (info) or `action.type` (exchange) matches.
    pub(crate) fn requests_of_type(&self, kind: &str) -> Vec<Value> {
        self.requests()
            .iter()
            .map(RecordedRequest::json)
            .filter(|body| {
                body["type"] == kind || body.pointer("/action/type").is_some_and(|t| t == kind)
            })
            .collect()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post(&self, url: &str, body: String) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::api("no scripted response", None, ResponseBody::Empty))
    }
}
