//!
//! # Response Envelope
//!
//! Every outward-facing result, success or failure, is normalized into the
//! same three-field shape: `{success, data, message}`. Building an envelope
//! is pure shape construction; serialization happens at the Actix boundary.

use serde::{Deserialize, Serialize};

/// Uniform wrapper around any operation result.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    pub fn error(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = ApiResponse::success(json!({"id": 1}), "Todo created successfully");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "data": {"id": 1},
                "message": "Todo created successfully"
            })
        );
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope: ApiResponse<serde_json::Value> = ApiResponse::error(None, "Todo not found");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "data": null,
                "message": "Todo not found"
            })
        );
    }
}
