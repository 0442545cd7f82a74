use serde_json::Value;

use crate::encoding::{coerce_string, field, EncodingSpec};
use crate::{DataSource, EncodingError, RequestArgs, IDENTITY_RESOURCE, KYC_STAGE0_KEY};

/// Identity lookup, stage 0: flattens the nested stage object into an
/// all-`string` tuple headed by the identity token.
///
/// Keys are emitted in the order the API sent them.
#[derive(Debug, Clone)]
pub struct KycStage0Source {
    stage_key: String,
}

impl KycStage0Source {
    pub fn new() -> Self {
        Self {
            stage_key: KYC_STAGE0_KEY.to_string(),
        }
    }

    /// Read the stage fields from a different member of the payload.
    pub fn with_stage_key(stage_key: impl Into<String>) -> Self {
        Self {
            stage_key: stage_key.into(),
        }
    }

    pub fn stage_key(&self) -> &str {
        &self.stage_key
    }
}

impl Default for KycStage0Source {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for KycStage0Source {
    fn resource_kind(&self) -> &str {
        IDENTITY_RESOURCE
    }

    fn build_spec(&self, args: &RequestArgs, data: &Value) -> Result<EncodingSpec, EncodingError> {
        let stage = match field(data, &self.stage_key) {
            Value::Object(stage) => stage,
            Value::Null => return Err(EncodingError::MissingField(self.stage_key.clone())),
            other => {
                return Err(EncodingError::UnexpectedShape(format!(
                    "'{}' must be an object, got {other}",
                    self.stage_key
                )))
            }
        };

        let mut spec = EncodingSpec::new();
        spec.push_string(args.first());
        for (key, value) in stage {
            spec.push_string(coerce_string(key, value)?);
        }
        Ok(spec)
    }
}
