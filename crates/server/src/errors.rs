use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Error returned by every handler, rendered as `{ "error": <message> }`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Validation(msg) => Self::bad_request(msg),
            ServiceError::Model(inner) => Self::bad_request(inner.to_string()),
            ServiceError::Db(detail) => {
                // 不向客户端暴露数据库细节
                error!(event = "db_error", error = %detail, "storage call failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = self.status.as_u16(), error = %self.message, "request rejected");
        }
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn service_errors_map_to_statuses() {
        let nf: JsonApiError = ServiceError::NotFound("company with id x not found".into()).into();
        assert_eq!(nf.status, StatusCode::NOT_FOUND);

        let v: JsonApiError = ServiceError::Validation("from_company_id and to_company_id must differ".into()).into();
        assert_eq!(v.status, StatusCode::BAD_REQUEST);

        let ro: JsonApiError = ServiceError::Model(ModelError::ReadOnly("id")).into();
        assert_eq!(ro.status, StatusCode::BAD_REQUEST);
        assert!(ro.message.contains("id"));

        let db: JsonApiError = ServiceError::Db("connection reset by peer".into()).into();
        assert_eq!(db.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!db.message.contains("peer"));
    }
}
