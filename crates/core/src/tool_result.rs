use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::product::ProductDetails;

/// Uniform outcome of a tool invocation.
///
/// Serializes as a flat mapping tagged by `status`: `{"status":"success", ..payload}` or
/// `{"status":"error","error_message":"..."}`. Payloads must serialize as JSON objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResult<T> {
    Success(T),
    Error { error_message: String },
}

impl<T> ToolResult<T> {
    pub fn success(payload: T) -> Self {
        Self::Success(payload)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { error_message: message.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error { error_message } => Some(error_message),
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Error { .. } => None,
        }
    }
}

impl<T: Serialize> ToolResult<T> {
    pub fn into_json(self) -> ToolResult<Value> {
        match self {
            Self::Success(payload) => match serde_json::to_value(payload) {
                Ok(value) => ToolResult::Success(value),
                Err(error) => ToolResult::error(format!("failed to encode tool output: {error}")),
            },
            Self::Error { error_message } => ToolResult::Error { error_message },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductNames {
    pub products: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLookup {
    pub product: ProductDetails,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_confirmation_id: String,
    pub shipping_tracking_id: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{OrderConfirmation, ProductNames, ToolResult};

    #[test]
    fn success_flattens_payload_next_to_status() {
        let result = ToolResult::success(ProductNames {
            products: vec!["Watch".to_string(), "Mug".to_string()],
        });

        let encoded = serde_json::to_value(&result).expect("result should serialize");
        assert_eq!(encoded, json!({"status": "success", "products": ["Watch", "Mug"]}));
    }

    #[test]
    fn error_carries_message_field() {
        let result: ToolResult<ProductNames> = ToolResult::error("Network error: unavailable");

        let encoded = serde_json::to_value(&result).expect("result should serialize");
        assert_eq!(
            encoded,
            json!({"status": "error", "error_message": "Network error: unavailable"})
        );
        assert_eq!(result.error_message(), Some("Network error: unavailable"));
        assert!(!result.is_success());
    }

    #[test]
    fn json_conversion_keeps_wire_shape() {
        let typed = ToolResult::success(OrderConfirmation {
            order_confirmation_id: "ord-1".to_string(),
            shipping_tracking_id: "trk-1".to_string(),
        });
        let expected = serde_json::to_value(&typed).expect("typed result should serialize");

        let untyped = typed.into_json();
        let encoded = serde_json::to_value(&untyped).expect("json result should serialize");

        assert_eq!(encoded, expected);
        assert_eq!(
            encoded,
            json!({
                "status": "success",
                "order_confirmation_id": "ord-1",
                "shipping_tracking_id": "trk-1"
            })
        );
    }

    #[test]
    fn decodes_from_wire_mapping() {
        let decoded: ToolResult<OrderConfirmation> = serde_json::from_value(json!({
            "status": "success",
            "order_confirmation_id": "ord-9",
            "shipping_tracking_id": "trk-9"
        }))
        .expect("mapping should decode");

        assert_eq!(
            decoded.payload().map(|order| order.shipping_tracking_id.as_str()),
            Some("trk-9")
        );
    }
}
