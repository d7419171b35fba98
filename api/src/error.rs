//! Mapping from domain errors to HTTP responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

use tb_core::errors::MarketError;
use tb_shared::types::response::ErrorBody;

/// Error type returned by every handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Market(#[from] MarketError),

    #[error("{0}")]
    Unauthorized(String),
}

impl ApiError {
    /// Collapse field-level validation failures into one domain error.
    pub fn from_validation(errors: ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        MarketError::validation(format!("invalid fields: {}", fields.join(", "))).into()
    }

    /// Stable machine-readable code for the error body.
    fn code(&self) -> &'static str {
        match self {
            ApiError::Market(err) => match err {
                MarketError::NotFound { .. } => "NOT_FOUND",
                MarketError::ProductUnavailable => "PRODUCT_UNAVAILABLE",
                MarketError::ForbiddenSelfTransaction => "FORBIDDEN_SELF_TRANSACTION",
                MarketError::Forbidden => "FORBIDDEN",
                MarketError::DateInPast => "DATE_IN_PAST",
                MarketError::InvalidDateRange => "INVALID_DATE_RANGE",
                MarketError::DateRangeConflict => "DATE_RANGE_CONFLICT",
                MarketError::InvalidState { .. } => "INVALID_STATE",
                MarketError::Validation { .. } => "VALIDATION_ERROR",
                MarketError::Database { .. } => "DATABASE_ERROR",
            },
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Market(err) => match err {
                MarketError::NotFound { .. } => StatusCode::NOT_FOUND,
                MarketError::Forbidden | MarketError::ForbiddenSelfTransaction => {
                    StatusCode::FORBIDDEN
                }
                MarketError::ProductUnavailable
                | MarketError::DateInPast
                | MarketError::InvalidDateRange
                | MarketError::DateRangeConflict
                | MarketError::InvalidState { .. }
                | MarketError::Validation { .. } => StatusCode::BAD_REQUEST,
                MarketError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Storage failures are logged with detail but reported generically.
        let message = match self {
            ApiError::Market(MarketError::Database { message }) => {
                tracing::error!(%message, "database error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.code(), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (MarketError::not_found("Product"), StatusCode::NOT_FOUND),
            (MarketError::ProductUnavailable, StatusCode::BAD_REQUEST),
            (MarketError::ForbiddenSelfTransaction, StatusCode::FORBIDDEN),
            (MarketError::Forbidden, StatusCode::FORBIDDEN),
            (MarketError::DateInPast, StatusCode::BAD_REQUEST),
            (MarketError::InvalidDateRange, StatusCode::BAD_REQUEST),
            (MarketError::DateRangeConflict, StatusCode::BAD_REQUEST),
            (
                MarketError::database("connection refused"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn database_detail_is_not_leaked() {
        let err = ApiError::from(MarketError::database("password for role postgres"));
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            ApiError::from(MarketError::DateRangeConflict).code(),
            "DATE_RANGE_CONFLICT"
        );
        assert_eq!(
            ApiError::Unauthorized("missing header".into()).code(),
            "UNAUTHORIZED"
        );
    }
}
