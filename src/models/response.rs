//! Uniform response envelope

use serde::{Deserialize, Serialize};

/// Envelope wrapping every API response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    /// Always serialized, `null` when there is no payload
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Successful response without a payload (deletions)
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_payload_serializes_as_null() {
        let value = serde_json::to_value(ApiResponse::<()>::empty("Book deleted successfully")).unwrap();
        assert_eq!(
            value,
            json!({ "success": true, "message": "Book deleted successfully", "data": null })
        );
    }

    #[test]
    fn error_envelope_is_unsuccessful() {
        let value = serde_json::to_value(ApiResponse::<()>::error("Book not found with ID: 4")).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Book not found with ID: 4");
        assert!(value["data"].is_null());
    }
}
