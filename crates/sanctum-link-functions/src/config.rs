//! Request configuration: which data source runs, with what arguments, and
//! what return type the on-chain consumer expects.
//!
//! Values come from the environment (after `.env` is loaded by the binary)
//! and fall back to the compiled-in defaults in [`crate::constants`].

use std::fmt;
use std::str::FromStr;

use crate::{
    DataSource, FunctionsError, KycDisclosureSource, KycStage0Source, ProductInformationSource,
    RequestArgs, API_BASE_URL, DEFAULT_TIMEOUT_MS,
};

/// The data sources a request can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    ProductInformation,
    KycVerifiedStage0,
    KycDisclosure,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::ProductInformation => "product-information",
            SourceKind::KycVerifiedStage0 => "kyc-verified-stage0",
            SourceKind::KycDisclosure => "kyc-disclosure",
        }
    }

    pub fn data_source(&self) -> Box<dyn DataSource> {
        match self {
            SourceKind::ProductInformation => Box::new(ProductInformationSource::new()),
            SourceKind::KycVerifiedStage0 => Box::new(KycStage0Source::new()),
            SourceKind::KycDisclosure => Box::new(KycDisclosureSource::new()),
        }
    }
}

impl FromStr for SourceKind {
    type Err = FunctionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "product-information" | "product" => Ok(SourceKind::ProductInformation),
            "kyc-verified-stage0" | "kyc-stage0" => Ok(SourceKind::KycVerifiedStage0),
            "kyc-disclosure" | "kyc" => Ok(SourceKind::KycDisclosure),
            other => Err(FunctionsError::ConfigError(format!(
                "unknown source '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return type the consumer decodes the result as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    Uint256,
    Int256,
    String,
    Bytes,
}

impl ReturnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnType::Uint256 => "uint256",
            ReturnType::Int256 => "int256",
            ReturnType::String => "string",
            ReturnType::Bytes => "bytes",
        }
    }
}

impl FromStr for ReturnType {
    type Err = FunctionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "uint" | "uint256" => Ok(ReturnType::Uint256),
            "int" | "int256" => Ok(ReturnType::Int256),
            "string" => Ok(ReturnType::String),
            "bytes" | "Buffer" => Ok(ReturnType::Bytes),
            other => Err(FunctionsError::ConfigError(format!(
                "unknown return type '{other}'"
            ))),
        }
    }
}

/// Configuration for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub source: SourceKind,
    pub args: Vec<String>,
    pub expected_return_type: ReturnType,
    pub api_base_url: String,
    pub timeout_ms: u64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::ProductInformation,
            args: vec!["1".to_string()],
            expected_return_type: ReturnType::Bytes,
            api_base_url: API_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl RequestConfig {
    /// Read `FUNCTIONS_*` variables from the process environment.
    pub fn from_env() -> Result<Self, FunctionsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank keys keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FunctionsError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(source) = get("FUNCTIONS_SOURCE") {
            config.source = source.parse()?;
        }

        if let Some(args) = get("FUNCTIONS_ARGS") {
            config.args = args.split(',').map(|s| s.trim().to_string()).collect();
        }

        if let Some(return_type) = get("FUNCTIONS_RETURN_TYPE") {
            config.expected_return_type = return_type.parse()?;
        }

        if let Some(url) = get("FUNCTIONS_API_BASE_URL") {
            config.api_base_url = url.trim().to_string();
        }

        if let Some(timeout) = get("FUNCTIONS_TIMEOUT_MS") {
            config.timeout_ms = timeout.trim().parse().map_err(|e| {
                FunctionsError::ConfigError(format!("invalid FUNCTIONS_TIMEOUT_MS '{timeout}': {e}"))
            })?;
        }

        Ok(config)
    }

    /// Check the configuration and produce the request arguments.
    pub fn validate(&self) -> Result<RequestArgs, FunctionsError> {
        if self.expected_return_type != ReturnType::Bytes {
            return Err(FunctionsError::ConfigError(format!(
                "{} returns ABI-encoded bytes, but expected return type is {}",
                self.source,
                self.expected_return_type.as_str()
            )));
        }

        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://") {
            return Err(FunctionsError::ConfigError(format!(
                "api base url must be http(s): {}",
                self.api_base_url
            )));
        }

        if self.timeout_ms == 0 {
            return Err(FunctionsError::ConfigError(
                "timeout must be greater than zero".to_string(),
            ));
        }

        RequestArgs::new(self.args.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_product_lookup() {
        let config = RequestConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RequestConfig::default());
        assert_eq!(config.source, SourceKind::ProductInformation);
        assert_eq!(config.args, vec!["1"]);
        assert_eq!(config.validate().unwrap().first(), "1");
    }

    #[test]
    fn test_reads_all_keys() {
        let config = RequestConfig::from_lookup(lookup(&[
            ("FUNCTIONS_SOURCE", "kyc-disclosure"),
            ("FUNCTIONS_ARGS", "ID1, extra"),
            ("FUNCTIONS_RETURN_TYPE", "Buffer"),
            ("FUNCTIONS_API_BASE_URL", "http://localhost:8787/api/v1"),
            ("FUNCTIONS_TIMEOUT_MS", "9000"),
        ]))
        .unwrap();

        assert_eq!(config.source, SourceKind::KycDisclosure);
        assert_eq!(config.args, vec!["ID1", "extra"]);
        assert_eq!(config.expected_return_type, ReturnType::Bytes);
        assert_eq!(config.api_base_url, "http://localhost:8787/api/v1");
        assert_eq!(config.timeout_ms, 9000);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = RequestConfig::from_lookup(lookup(&[("FUNCTIONS_SOURCE", "  ")])).unwrap();
        assert_eq!(config.source, SourceKind::ProductInformation);
    }

    #[test]
    fn test_unknown_source_rejected() {
        let err = RequestConfig::from_lookup(lookup(&[("FUNCTIONS_SOURCE", "weather")]));
        assert!(matches!(err, Err(FunctionsError::ConfigError(_))));
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let err = RequestConfig::from_lookup(lookup(&[("FUNCTIONS_TIMEOUT_MS", "soon")]));
        assert!(matches!(err, Err(FunctionsError::ConfigError(_))));
    }

    #[test]
    fn test_return_type_aliases() {
        assert_eq!("uint".parse::<ReturnType>().unwrap(), ReturnType::Uint256);
        assert_eq!("int256".parse::<ReturnType>().unwrap(), ReturnType::Int256);
        assert_eq!("string".parse::<ReturnType>().unwrap(), ReturnType::String);
        assert_eq!("bytes".parse::<ReturnType>().unwrap(), ReturnType::Bytes);
        assert!("bool".parse::<ReturnType>().is_err());
    }

    #[test]
    fn test_non_bytes_return_type_fails_validation() {
        let config = RequestConfig {
            expected_return_type: ReturnType::String,
            ..RequestConfig::default()
        };
        assert!(matches!(config.validate(), Err(FunctionsError::ConfigError(_))));
    }

    #[test]
    fn test_empty_first_arg_fails_validation() {
        let config = RequestConfig::from_lookup(lookup(&[("FUNCTIONS_ARGS", ",second")])).unwrap();
        assert!(matches!(config.validate(), Err(FunctionsError::InvalidArgs(_))));
    }

    #[test]
    fn test_non_http_base_url_fails_validation() {
        let config = RequestConfig {
            api_base_url: "ftp://example.com".to_string(),
            ..RequestConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_source_kind_resolves_resource() {
        assert_eq!(SourceKind::ProductInformation.data_source().resource_kind(), "product");
        assert_eq!(SourceKind::KycVerifiedStage0.data_source().resource_kind(), "identity");
        assert_eq!(SourceKind::KycDisclosure.data_source().resource_kind(), "identity");
        assert_eq!("kyc-stage0".parse::<SourceKind>().unwrap(), SourceKind::KycVerifiedStage0);
    }
}
