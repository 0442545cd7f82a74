//! The request pipeline: fetch → validate → encode.
//!
//! One invocation issues exactly one GET, then validates and encodes
//! synchronously. Nothing is cached or retried, and no state outlives the
//! call.

use serde_json::Value;

use crate::encoding::EncodedResult;
use crate::request::resource_url;
use crate::{DataSource, FunctionsError, HttpFetcher, HttpResponse, RequestArgs, API_BASE_URL};

/// Runs data sources against the Sanctum Link API through a host-supplied
/// [`HttpFetcher`].
pub struct RequestPipeline<F: HttpFetcher> {
    fetcher: F,
    base_url: String,
}

impl<F: HttpFetcher> RequestPipeline<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_base_url(fetcher, API_BASE_URL)
    }

    pub fn with_base_url(fetcher: F, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch stage: one GET to `<base>/<kind>/<args[0]>`.
    pub async fn fetch<S: DataSource + ?Sized>(
        &self,
        source: &S,
        args: &RequestArgs,
    ) -> HttpResponse {
        let url = resource_url(&self.base_url, source.resource_kind(), args);
        tracing::info!(%url, "fetching");
        self.fetcher.get(&url).await
    }

    /// Run all three stages for `source`.
    pub async fn run<S: DataSource + ?Sized>(
        &self,
        source: &S,
        args: &RequestArgs,
    ) -> Result<EncodedResult, FunctionsError> {
        let response = self.fetch(source, args).await;
        let data = validate(&response)?;
        encode(source, args, data)
    }
}

/// Validate stage: fail on the top-level error marker, otherwise hand the
/// payload through without inspecting its shape.
pub fn validate(response: &HttpResponse) -> Result<&Value, FunctionsError> {
    if let Some(error) = &response.error {
        tracing::error!(error = %error, status = ?response.status, "upstream request failed");
        return Err(FunctionsError::RequestFailed {
            cause: error.clone(),
        });
    }
    Ok(&response.data)
}

/// Encode stage.
pub fn encode<S: DataSource + ?Sized>(
    source: &S,
    args: &RequestArgs,
    data: &Value,
) -> Result<EncodedResult, FunctionsError> {
    let spec = source.build_spec(args, data)?;
    Ok(spec.encode()?)
}
