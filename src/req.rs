use std::{fmt, sync::Arc};

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    errors::ResponseBody, exchange::ExchangeResponse, prelude::*, Error,
};

/// Status code and raw body of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The raw fetch the SDK is built on. Implementations must not retry; retry
/// policy belongs to the caller.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(&self, url: &str, body: String) -> Result<HttpResponse>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, url: &str, body: String) -> Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::api(format!("request to {url} failed: {e}"), None, ResponseBody::Empty))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::api(format!("reading body from {url} failed: {e}"), Some(status), ResponseBody::Empty))?;
        Ok(HttpResponse { status, body })
    }
}

#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn HttpTransport>,
    pub base_url: String,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_reqwest(client: Client, base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(ReqwestTransport::new(client)), base_url)
    }

    async fn post(&self, url_path: &'static str, data: String) -> Result<HttpResponse> {
        let full_url = format!("{}{url_path}", self.base_url);
        debug!(endpoint = url_path, "Sending request");
        let response = self.transport.post(&full_url, data).await?;
        debug!(endpoint = url_path, status = response.status, "Received response");
        Ok(response)
    }

    /// POST a query to `/info` and decode the body as `R`.
    ///
    /// Non-2xx responses and bodies that do not decode as `R` are API errors
    /// carrying the raw body.
    pub async fn post_info<Q, R>(&self, query: &Q) -> Result<R>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let data = serde_json::to_string(query).map_err(|e| Error::Json(e.to_string()))?;
        let response = self.post("/info", data).await?;
        parse_info_response(response)
    }

    /// POST a signed envelope to `/exchange`.
    pub async fn post_exchange<P>(&self, payload: &P) -> Result<ExchangeResponse>
    where
        P: Serialize + ?Sized,
    {
        let data = serde_json::to_string(payload).map_err(|e| Error::Json(e.to_string()))?;
        // Note: not logging the payload as it carries signatures
        let response = self.post("/exchange", data).await?;
        parse_exchange_response(response)
    }
}

pub(crate) fn parse_info_response<R: DeserializeOwned>(response: HttpResponse) -> Result<R> {
    if !(200..300).contains(&response.status) {
        let body = ResponseBody::parse(&response.body);
        return Err(Error::api(
            format!("info request failed: {}", summarize(&body)),
            Some(response.status),
            body,
        ));
    }
    serde_json::from_str(&response.body).map_err(|e| {
        Error::api(
            format!("unexpected info response: {e}"),
            Some(response.status),
            ResponseBody::parse(&response.body),
        )
    })
}

pub(crate) fn parse_exchange_response(response: HttpResponse) -> Result<ExchangeResponse> {
    let status = response.status;
    let body = ResponseBody::parse(&response.body);

    if status >= 400 {
        return Err(Error::api(
            format!("exchange request failed: {}", summarize(&body)),
            Some(status),
            body,
        ));
    }

    let Some(json) = body.as_json() else {
        return Err(Error::api(
            format!("exchange returned a non-JSON body: {body}"),
            Some(status),
            body,
        ));
    };

    if json.get("status").and_then(Value::as_str) != Some("ok") {
        let message = json
            .get("response")
            .map(|r| r.as_str().map(str::to_string).unwrap_or_else(|| r.to_string()))
            .unwrap_or_else(|| "exchange did not return status ok".to_string());
        warn!(status, %message, "Exchange rejected action");
        return Err(Error::api(message, Some(status), body));
    }

    let order_errors: Vec<&str> = json
        .pointer("/response/data/statuses")
        .and_then(Value::as_array)
        .map(|statuses| {
            statuses
                .iter()
                .filter_map(|s| s.get("error").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();
    if !order_errors.is_empty() {
        let message = order_errors.join("; ");
        warn!(status, %message, "Exchange rejected orders");
        return Err(Error::api(message, Some(status), body));
    }

    let inner = json.get("response").cloned().unwrap_or(Value::Null);
    serde_json::from_value(inner).map_err(|e| {
        Error::api(
            format!("unexpected exchange response: {e}"),
            Some(status),
            body.clone(),
        )
    })
}

fn summarize(body: &ResponseBody) -> String {
    match body {
        ResponseBody::Json(value) => value
            .get("error")
            .or_else(|| value.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}
