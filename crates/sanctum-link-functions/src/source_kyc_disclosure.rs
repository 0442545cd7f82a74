use serde_json::Value;

use crate::encoding::{coerce_string, field, EncodingSpec};
use crate::{DataSource, EncodingError, RequestArgs, IDENTITY_RESOURCE, VERIFIED_ON_CHAIN_KEY};

/// Identity lookup with per-field disclosure.
///
/// The payload holds, under the identity token, an array of records shaped
/// `{ <field>: <value>, "verifiedOnChain": bool }`. Every record yields one
/// `string` slot: its value when verified on chain, otherwise `""`. Redacted
/// fields keep their slot so decoders can rely on a fixed field count.
#[derive(Debug, Clone)]
pub struct KycDisclosureSource {
    identity_prefix: bool,
}

impl KycDisclosureSource {
    /// Source that leads the tuple with the identity token.
    pub fn new() -> Self {
        Self {
            identity_prefix: true,
        }
    }

    /// Source that encodes the disclosed fields only.
    pub fn without_identity_prefix() -> Self {
        Self {
            identity_prefix: false,
        }
    }
}

impl Default for KycDisclosureSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for KycDisclosureSource {
    fn resource_kind(&self) -> &str {
        IDENTITY_RESOURCE
    }

    fn build_spec(&self, args: &RequestArgs, data: &Value) -> Result<EncodingSpec, EncodingError> {
        let token = args.first();
        let records = match field(data, token) {
            Value::Array(records) => records,
            Value::Null => return Err(EncodingError::MissingField(token.to_string())),
            other => {
                return Err(EncodingError::UnexpectedShape(format!(
                    "records for '{token}' must be an array, got {other}"
                )))
            }
        };

        let mut spec = EncodingSpec::new();
        if self.identity_prefix {
            spec.push_string(token);
        }

        for (index, record) in records.iter().enumerate() {
            let (name, value) = disclosed_field(index, record)?;
            if record.get(VERIFIED_ON_CHAIN_KEY) == Some(&Value::Bool(true)) {
                spec.push_string(coerce_string(name, value)?);
            } else {
                spec.push_string("");
            }
        }
        Ok(spec)
    }
}

/// The record's single data member: its first key other than the flag.
fn disclosed_field(index: usize, record: &Value) -> Result<(&str, &Value), EncodingError> {
    let Value::Object(members) = record else {
        return Err(EncodingError::UnexpectedShape(format!(
            "record {index} must be an object, got {record}"
        )));
    };

    members
        .iter()
        .find(|(key, _)| key.as_str() != VERIFIED_ON_CHAIN_KEY)
        .map(|(key, value)| (key.as_str(), value))
        .ok_or_else(|| {
            EncodingError::UnexpectedShape(format!("record {index} has no data field"))
        })
}
