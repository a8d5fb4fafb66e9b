use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::models::FieldError;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    ValidationFailed(Vec<FieldError>),
    InvalidRequest(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationFailed(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                write!(f, "Validation failed: {}", fields.join(", "))
            }
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationFailed(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationFailed(errors) => serde_json::json!({
                "success": false,
                "error": "Validation failed",
                "errors": errors
            }),
            other => serde_json::json!({
                "success": false,
                "error": other.to_string()
            }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound("user 7".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ValidationFailed(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display_lists_failed_fields() {
        let err = AppError::ValidationFailed(vec![
            FieldError { field: "name".into(), message: "required".into() },
            FieldError { field: "email".into(), message: "required".into() },
        ]);
        assert_eq!(err.to_string(), "Validation failed: name, email");
    }
}
