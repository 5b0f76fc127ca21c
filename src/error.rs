use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::validation::{BookingRuleViolation, RatingOutOfRange};

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("missing or invalid X-User-Id header")]
    Unauthorized,
    #[error("not permitted for this user")]
    Forbidden,
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl From<BookingRuleViolation> for ApiError {
    fn from(violation: BookingRuleViolation) -> Self {
        ApiError::Validation(violation.to_string())
    }
}

impl From<RatingOutOfRange> for ApiError {
    fn from(violation: RatingOutOfRange) -> Self {
        ApiError::Validation(violation.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Persistence failures are logged server-side; the body stays generic.
        if let ApiError::Database(e) = self {
            log::error!("database failure: {e}");
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::Validation("check-out date must be after check-in date".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_resource_maps_to_not_found() {
        let err = ApiError::NotFound("listing");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "listing not found");
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = ApiError::Conflict("listing is already booked for the requested dates".into());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn actor_errors_map_to_401_and_403() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn database_errors_stay_generic() {
        let err = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "database error");
    }
}
