//! Off-chain request functions for Sanctum Link.
//!
//! Each data source fetches one record from the Sanctum Link worker API,
//! checks the response for an error marker, and ABI-encodes selected fields
//! for an on-chain consumer.
//!
//! # Data sources
//!
//! - **Product information** ([`ProductInformationSource`]) — `(uint256, uint256, uint256, string)`
//! - **KYC stage 0** ([`KycStage0Source`]) — identity token plus every stage-0 field, all `string`
//! - **KYC disclosure** ([`KycDisclosureSource`]) — one `string` per field, redacted to `""` unless verified on chain
//!
//! # Quick example
//!
//! ```no_run
//! use sanctum_functions::{ProductInformationSource, ReqwestFetcher, RequestArgs, RequestPipeline};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let pipeline = RequestPipeline::new(ReqwestFetcher::new());
//! let args = RequestArgs::new(vec!["1".to_string()]).unwrap();
//!
//! let encoded = pipeline
//!     .run(&ProductInformationSource, &args)
//!     .await
//!     .unwrap();
//! println!("{encoded}");
//! # }
//! ```

// Core types and traits
pub mod config;
pub mod constants;
pub mod encoding;
pub mod error;
pub mod request;
pub mod response;
pub mod source;

// Data sources
pub mod source_kyc_disclosure;
pub mod source_kyc_stage0;
pub mod source_product;

pub mod pipeline;

// HTTP client
#[cfg(feature = "full")]
pub mod http_client;

use alloy::sol;

// Typed view of a product lookup result.
sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct ProductInformation {
        uint256 productId;
        uint256 price;
        uint256 stock;
        string description;
    }
}

// Re-exports
pub use config::{RequestConfig, ReturnType, SourceKind};
pub use constants::*;
pub use encoding::{EncodedResult, EncodingSpec};
pub use error::{EncodingError, FunctionsError};
pub use pipeline::RequestPipeline;
pub use request::RequestArgs;
pub use response::HttpResponse;
pub use source::{DataSource, HttpFetcher};

pub use source_kyc_disclosure::KycDisclosureSource;
pub use source_kyc_stage0::KycStage0Source;
pub use source_product::{decode_product, ProductInformationSource};

#[cfg(feature = "full")]
pub use http_client::ReqwestFetcher;
