use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use crate::services::ServiceError;

/// One failed field of a schema-validated request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Unified application error type that maps to JSON HTTP responses.
///
/// Every failure leaves the server as `{ "success": false, "code": "...", "message": "..." }`,
/// with an extra `errors` array for schema validation failures.
#[derive(Debug)]
pub enum AppError {
    /// 400 Bad Request
    BadRequest(String),
    /// 401 Unauthorized
    Unauthorized(String),
    /// 403 Forbidden
    Forbidden(String),
    /// 404 Not Found
    NotFound(String),
    /// 413 Payload Too Large
    PayloadTooLarge(String),
    /// A named business-rule or validation failure raised by a service
    Service(ServiceError),
    /// 500 Internal Server Error (wraps any error, logs details, returns generic message)
    Internal(anyhow::Error),
}

const GENERIC_FAILURE: &str = "Something went wrong";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg, None),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg, None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            Self::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg, None)
            }
            Self::Service(err) => service_parts(err),
            Self::Internal(err) => {
                tracing::error!("Internal server error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    GENERIC_FAILURE.to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "success": false,
            "code": code,
            "message": message,
        });
        if let Some(errors) = errors {
            body["errors"] = json!(errors);
        }

        (status, Json(body)).into_response()
    }
}

/// Classify a service failure once: status, stable code, client-safe message.
fn service_parts(err: ServiceError) -> (StatusCode, &'static str, String, Option<Vec<FieldError>>) {
    use ServiceError as E;

    let status = match &err {
        E::MissingFields
        | E::InvalidAge
        | E::InvalidPhone
        | E::InvalidRole
        | E::InvalidPhoto
        | E::InvalidPrice
        | E::InvalidInput
        | E::PlayerIdRequired
        | E::InvalidTab
        | E::CredentialsRequired
        | E::InvalidSchedule(_)
        | E::Validation(_) => StatusCode::BAD_REQUEST,
        E::InvalidCredentials => StatusCode::UNAUTHORIZED,
        E::NoActiveTeam | E::RegistrationClosed => StatusCode::FORBIDDEN,
        E::SeasonNotFound
        | E::NoActiveSeason
        | E::PlayerNotFound
        | E::TeamNotFound
        | E::OwnerNotFound => StatusCode::NOT_FOUND,
        E::DuplicateRegistration
        | E::AlreadySold
        | E::NotSold
        | E::PhoneInUse
        | E::Conflict(_) => StatusCode::CONFLICT,
        E::PhotoTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        E::Storage(_) => StatusCode::BAD_GATEWAY,
        E::Database(_) | E::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let code = err.code();
    match err {
        E::Validation(errors) => (status, code, "Validation failed".to_string(), Some(errors)),
        E::Storage(source) => {
            tracing::error!("Image storage failure: {source:#}");
            (status, code, E::Storage(source).to_string(), None)
        }
        E::Database(source) => {
            tracing::error!("Database failure: {source}");
            (status, code, GENERIC_FAILURE.to_string(), None)
        }
        E::Internal(source) => {
            tracing::error!("Internal server error: {source:#}");
            (status, code, GENERIC_FAILURE.to_string(), None)
        }
        other => (status, code, other.to_string(), None),
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

// Extractor rejections are plain text by default; route them through the JSON body.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {rejection}");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::PayloadTooLarge("Request body too large".to_string());
        }
        Self::BadRequest("Invalid request body".to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {rejection}");
        Self::BadRequest("Invalid query parameters".to_string())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameter: {rejection}");
        Self::BadRequest("Invalid path parameter".to_string())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!("Rejected multipart body: {rejection}");
        Self::BadRequest("Invalid multipart data".to_string())
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Internal(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}
