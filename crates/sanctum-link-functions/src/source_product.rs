use alloy::sol_types::SolType;
use serde_json::Value;

use crate::encoding::{coerce_string, coerce_uint256, field, EncodedResult, EncodingSpec};
use crate::{DataSource, EncodingError, ProductInformation, RequestArgs, PRODUCT_RESOURCE};

/// Product lookup: encodes `(productId, price, stock, description)` as
/// `(uint256, uint256, uint256, string)`.
///
/// The slot order is fixed and does not depend on the payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductInformationSource;

impl ProductInformationSource {
    pub fn new() -> Self {
        Self
    }
}

impl DataSource for ProductInformationSource {
    fn resource_kind(&self) -> &str {
        PRODUCT_RESOURCE
    }

    fn build_spec(&self, args: &RequestArgs, data: &Value) -> Result<EncodingSpec, EncodingError> {
        let product_id = coerce_uint256("productId", &Value::String(args.first().to_string()))?;
        let price = coerce_uint256("price", field(data, "price"))?;
        let stock = coerce_uint256("stock", field(data, "stock"))?;
        let description = coerce_string("description", field(data, "description"))?;

        let mut spec = EncodingSpec::new();
        spec.push_uint256(product_id);
        spec.push_uint256(price);
        spec.push_uint256(stock);
        spec.push_string(description);
        Ok(spec)
    }
}

/// Decode a product result into its typed form.
pub fn decode_product(result: &EncodedResult) -> Result<ProductInformation, EncodingError> {
    Ok(ProductInformation::abi_decode_params(result.as_bytes())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use serde_json::json;

    fn args(id: &str) -> RequestArgs {
        RequestArgs::new(vec![id.to_string()]).unwrap()
    }

    #[test]
    fn test_product_roundtrip() {
        let data = json!({ "price": "2500", "stock": 14, "description": "Hand-thrown mug" });
        let spec = ProductInformationSource.build_spec(&args("7"), &data).unwrap();
        assert_eq!(spec.type_names(), vec!["uint256", "uint256", "uint256", "string"]);

        let product = decode_product(&spec.encode().unwrap()).unwrap();
        assert_eq!(product.productId, U256::from(7));
        assert_eq!(product.price, U256::from(2500));
        assert_eq!(product.stock, U256::from(14));
        assert_eq!(product.description, "Hand-thrown mug");
    }

    #[test]
    fn test_decode_with_dynamic_types_agrees() {
        let data = json!({ "price": 10, "stock": "3", "description": "" });
        let spec = ProductInformationSource.build_spec(&args("1"), &data).unwrap();
        let encoded = spec.encode().unwrap();
        assert_eq!(encoded.decode(spec.types()).unwrap(), spec.values());
    }

    #[test]
    fn test_integral_float_and_large_price_accepted() {
        let data: Value = serde_json::from_str(
            r#"{"price":2500.0,"stock":100000000000000000000,"description":"x"}"#,
        )
        .unwrap();
        let spec = ProductInformationSource.build_spec(&args("1"), &data).unwrap();

        let product = decode_product(&spec.encode().unwrap()).unwrap();
        assert_eq!(product.price, U256::from(2500));
        assert_eq!(product.stock, U256::from(100_000_000_000_000_000_000u128));

        let as_text = json!({ "price": "2500", "stock": "100000000000000000000", "description": "x" });
        let text_spec = ProductInformationSource.build_spec(&args("1"), &as_text).unwrap();
        assert_eq!(spec.encode().unwrap(), text_spec.encode().unwrap());
    }

    #[test]
    fn test_fractional_price_fails() {
        let data = json!({ "price": "19.99", "stock": 1, "description": "x" });
        let err = ProductInformationSource.build_spec(&args("1"), &data).unwrap_err();
        assert!(matches!(err, EncodingError::NotAnInteger { ref field, .. } if field == "price"));
    }

    #[test]
    fn test_non_numeric_stock_fails() {
        let data = json!({ "price": 1, "stock": "plenty", "description": "x" });
        assert!(ProductInformationSource.build_spec(&args("1"), &data).is_err());
    }

    #[test]
    fn test_non_numeric_product_id_fails() {
        let data = json!({ "price": 1, "stock": 1, "description": "x" });
        let err = ProductInformationSource.build_spec(&args("sku-1"), &data).unwrap_err();
        assert!(matches!(err, EncodingError::NotAnInteger { ref field, .. } if field == "productId"));
    }

    #[test]
    fn test_missing_description_fails_at_encode() {
        let data = json!({ "price": 1, "stock": 1 });
        let err = ProductInformationSource.build_spec(&args("1"), &data).unwrap_err();
        assert!(matches!(err, EncodingError::MissingField(ref f) if f == "description"));
    }

    #[test]
    fn test_non_object_payload_fails() {
        let err = ProductInformationSource
            .build_spec(&args("1"), &json!("not an object"))
            .unwrap_err();
        assert!(matches!(err, EncodingError::MissingField(_)));
    }
}
