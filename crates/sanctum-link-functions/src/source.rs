//! Core trait definitions for the fetch → validate → encode pipeline.
//!
//! - [`HttpFetcher`] — host side: performs the single outbound GET
//! - [`DataSource`] — per-script side: names the resource and encodes its payload
//!
//! See [`crate::source_product::ProductInformationSource`],
//! [`crate::source_kyc_stage0::KycStage0Source`] and
//! [`crate::source_kyc_disclosure::KycDisclosureSource`] for the implementations.

use crate::encoding::EncodingSpec;
use crate::error::EncodingError;
use crate::request::RequestArgs;
use crate::response::HttpResponse;
use serde_json::Value;

/// Host-supplied HTTP primitive.
///
/// Transport failures and non-success statuses are reported through
/// [`HttpResponse::error`], never as a Rust error, so the pipeline's
/// validate stage is the single place that turns them into failures.
/// Timeouts and redirects are the implementation's business.
pub trait HttpFetcher: Send + Sync {
    /// Issue one GET to `url`.
    fn get(&self, url: &str) -> impl std::future::Future<Output = HttpResponse> + Send;
}

/// A data source: one of the request scripts the host can select.
pub trait DataSource: Send + Sync {
    /// Path segment between the API root and `args[0]`.
    fn resource_kind(&self) -> &str;

    /// Project the response payload into order-aligned ABI types and values.
    fn build_spec(&self, args: &RequestArgs, data: &Value) -> Result<EncodingSpec, EncodingError>;
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn resource_kind(&self) -> &str {
        (**self).resource_kind()
    }

    fn build_spec(&self, args: &RequestArgs, data: &Value) -> Result<EncodingSpec, EncodingError> {
        (**self).build_spec(args, data)
    }
}
