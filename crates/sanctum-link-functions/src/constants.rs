/// Sanctum Link worker API root. Resource paths are appended as
/// `<kind>/<arg0>`.
pub const API_BASE_URL: &str = "https://sanctum-link-worker.danny-b41.workers.dev/api/v1";

/// Resource kind served by the product lookup endpoint.
pub const PRODUCT_RESOURCE: &str = "product";

/// Resource kind served by the identity lookup endpoint.
pub const IDENTITY_RESOURCE: &str = "identity";

/// Nested object holding stage-0 KYC verification fields.
pub const KYC_STAGE0_KEY: &str = "kycVerifiedStage0";

/// Per-record disclosure flag in the conditional-disclosure payload.
pub const VERIFIED_ON_CHAIN_KEY: &str = "verifiedOnChain";

/// Default timeout for the outbound GET, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Message carried by the fatal error raised on an HTTP error marker.
pub const REQUEST_FAILED: &str = "Request failed";
