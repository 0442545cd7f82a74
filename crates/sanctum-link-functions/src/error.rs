use thiserror::Error;

/// Errors returned by a request pipeline run.
///
/// Every variant is fatal: there is no retry tier and no partial result.
#[derive(Debug, Error)]
pub enum FunctionsError {
    /// The HTTP layer reported an error marker. The cause has already been
    /// logged; the message is fixed.
    #[error("Request failed")]
    RequestFailed { cause: String },

    #[error("invalid request args: {0}")]
    InvalidArgs(String),

    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Faults raised while projecting response data into ABI values.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("missing field: {0}")]
    MissingField(String),

    #[error("field '{field}' is not a non-negative integer: {value}")]
    NotAnInteger { field: String, value: String },

    #[error("field '{field}' is not a string: {value}")]
    NotAString { field: String, value: String },

    #[error("unexpected payload shape: {0}")]
    UnexpectedShape(String),

    #[error("type list has {types} entries but value list has {values}")]
    LengthMismatch { types: usize, values: usize },

    #[error("value at position {index} does not match ABI type {ty}")]
    TypeMismatch { index: usize, ty: String },

    #[error("abi error: {0}")]
    Abi(#[from] alloy::dyn_abi::Error),

    #[error("abi error: {0}")]
    SolTypes(#[from] alloy::sol_types::Error),
}
