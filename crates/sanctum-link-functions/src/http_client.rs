use serde_json::Value;
use std::time::Duration;

use crate::{HttpFetcher, HttpResponse, DEFAULT_TIMEOUT_MS};

/// [`HttpFetcher`] backed by `reqwest::Client`.
///
/// Transport failures, timeouts and non-2xx statuses become the response's
/// error marker. Bodies are parsed as JSON when possible and otherwise kept
/// as a JSON string.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    http: reqwest::Client,
    timeout: Duration,
}

impl ReqwestFetcher {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), timeout)
    }

    pub fn with_client(http: reqwest::Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ReqwestFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> HttpResponse {
        let resp = match self.http.get(url).timeout(self.timeout).send().await {
            Ok(resp) => resp,
            Err(e) => return HttpResponse::failed(format!("request failed: {e}"), None),
        };

        let status = resp.status();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                return HttpResponse::failed(
                    format!("failed to read body: {e}"),
                    Some(status.as_u16()),
                )
            }
        };
        let data = serde_json::from_str(&body).unwrap_or(Value::String(body));

        let error = (!status.is_success()).then(|| format!("upstream returned {status}"));
        tracing::debug!(status = status.as_u16(), error = ?error, "response received");

        HttpResponse {
            error,
            status: Some(status.as_u16()),
            data,
        }
    }
}
