//! Unit tests for notes API error types

#[cfg(test)]
mod tests {
    use crate::api::error::ApiError;
    use std::error::Error;

    #[test]
    fn test_status_error_display() {
        let error = ApiError::Status {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(error.to_string(), "Notes service returned 404: Not Found");
    }

    #[test]
    fn test_validation_error_display() {
        let error = ApiError::Validation("title is required".to_string());
        assert_eq!(error.to_string(), "Invalid note: title is required");
    }

    #[test]
    fn test_unauthorized_detection() {
        let unauthorized = ApiError::Status {
            status: 401,
            body: String::new(),
        };
        let forbidden = ApiError::Status {
            status: 403,
            body: String::new(),
        };
        let server = ApiError::Status {
            status: 500,
            body: String::new(),
        };

        assert!(unauthorized.is_unauthorized());
        assert!(forbidden.is_unauthorized());
        assert!(!server.is_unauthorized());
        assert!(!ApiError::Validation("x".into()).is_unauthorized());
    }

    #[test]
    fn test_decode_error_has_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ApiError::from(json_err);
        assert!(error.to_string().starts_with("Error while decoding response"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_debug() {
        let error = ApiError::Validation("test error".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Validation"));
        assert!(debug.contains("test error"));
    }
}
