//! ABI encoding of the pipeline's result.
//!
//! Provides:
//! - [`EncodingSpec`], the order-aligned list of ABI types and values a data source builds
//! - [`EncodedResult`], the parameter-encoded bytes returned to the host
//! - Field coercions shared by the data sources ([`coerce_uint256`], [`coerce_string`])
//!
//! The byte layout is that of `AbiCoder.encode(types, values)`: the tuple's
//! members are encoded as a parameter sequence with no outer offset word.

use alloy::dyn_abi::{DynSolType, DynSolValue};
use alloy::primitives::{hex, Bytes, U256};
use serde_json::Value;
use std::fmt;

use crate::error::EncodingError;

/// Order-aligned ABI types and values.
///
/// Entries are only added through [`EncodingSpec::push`], which appends to
/// both lists at once, so their lengths cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodingSpec {
    types: Vec<DynSolType>,
    values: Vec<DynSolValue>,
}

impl EncodingSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ty: DynSolType, value: DynSolValue) {
        self.types.push(ty);
        self.values.push(value);
    }

    pub fn push_uint256(&mut self, value: U256) {
        self.push(DynSolType::Uint(256), DynSolValue::Uint(value, 256));
    }

    pub fn push_string(&mut self, value: impl Into<String>) {
        self.push(DynSolType::String, DynSolValue::String(value.into()));
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> &[DynSolType] {
        &self.types
    }

    pub fn values(&self) -> &[DynSolValue] {
        &self.values
    }

    /// Solidity names of the type list, e.g. `["uint256", "string"]`.
    pub fn type_names(&self) -> Vec<String> {
        self.types
            .iter()
            .map(|ty| ty.sol_type_name().into_owned())
            .collect()
    }

    /// Encode the values as an ABI parameter tuple.
    pub fn encode(&self) -> Result<EncodedResult, EncodingError> {
        if self.types.len() != self.values.len() {
            return Err(EncodingError::LengthMismatch {
                types: self.types.len(),
                values: self.values.len(),
            });
        }

        for (index, (ty, value)) in self.types.iter().zip(&self.values).enumerate() {
            if !ty.matches(value) {
                return Err(EncodingError::TypeMismatch {
                    index,
                    ty: ty.sol_type_name().into_owned(),
                });
            }
        }

        let encoded = DynSolValue::Tuple(self.values.clone()).abi_encode_params();
        tracing::debug!(
            types = ?self.type_names(),
            bytes = encoded.len(),
            "encoded result"
        );
        Ok(EncodedResult(Bytes::from(encoded)))
    }
}

/// ABI-encoded bytes returned to the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedResult(Bytes);

impl EncodedResult {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode back into values, given the type list the consumer expects.
    pub fn decode(&self, types: &[DynSolType]) -> Result<Vec<DynSolValue>, EncodingError> {
        let tuple = DynSolType::Tuple(types.to_vec());
        match tuple.abi_decode_params(&self.0)? {
            DynSolValue::Tuple(values) => Ok(values),
            other => Err(EncodingError::UnexpectedShape(format!(
                "decoded {other:?}, expected a tuple"
            ))),
        }
    }
}

impl AsRef<[u8]> for EncodedResult {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<EncodedResult> for Vec<u8> {
    fn from(result: EncodedResult) -> Self {
        result.0.to_vec()
    }
}

impl fmt::Display for EncodedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_prefixed(&self.0))
    }
}

/// Member `name` of a JSON object, or `Null` when absent or when `data` is
/// not an object.
pub(crate) fn field<'a>(data: &'a Value, name: &str) -> &'a Value {
    static NULL: Value = Value::Null;
    data.get(name).unwrap_or(&NULL)
}

/// Coerce a JSON number or decimal string into a `uint256`.
///
/// Any integral value is accepted, including `2500.0`, `25e2` and literals
/// beyond `u64`. Fractions, signs, blanks and anything else non-numeric fail
/// rather than round or default to zero.
pub fn coerce_uint256(field: &str, value: &Value) -> Result<U256, EncodingError> {
    let not_an_integer = || EncodingError::NotAnInteger {
        field: field.to_string(),
        value: value.to_string(),
    };

    let literal = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        Value::Null => return Err(EncodingError::MissingField(field.to_string())),
        _ => return Err(not_an_integer()),
    };

    let digits = integral_digits(&literal).ok_or_else(not_an_integer)?;
    U256::from_str_radix(&digits, 10).map_err(|_| not_an_integer())
}

/// Longest digit string worth handing to the parser; `uint256::MAX` has 78.
const MAX_DIGITS: usize = 80;

/// Reduce an unsigned decimal literal (`123`, `123.000`, `1.5e3`) to its
/// integer digits, or `None` if it has a non-zero fractional part.
fn integral_digits(literal: &str) -> Option<String> {
    let (mantissa, exponent) = match literal.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.strip_prefix('+').unwrap_or(e).parse::<i64>().ok()?),
        None => (literal, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let mut digits = format!("{int_part}{frac_part}");
    let shift = exponent.checked_sub(frac_part.len() as i64)?;
    if shift >= 0 {
        if digits.len() as i64 + shift > MAX_DIGITS as i64 {
            return None;
        }
        digits.push_str(&"0".repeat(shift as usize));
    } else {
        let drop = usize::try_from(shift.unsigned_abs()).unwrap_or(usize::MAX);
        let keep = digits.len().saturating_sub(drop);
        if !digits[keep..].bytes().all(|b| b == b'0') {
            return None;
        }
        digits.truncate(keep);
    }

    let trimmed = digits.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
}

/// Require a JSON string.
pub fn coerce_string(field: &str, value: &Value) -> Result<String, EncodingError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Err(EncodingError::MissingField(field.to_string())),
        other => Err(EncodingError::NotAString {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}
