//! API error replies

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use userapi_types::MessageResponse;
use uuid::Uuid;

/// Error replies the API can produce.
///
/// A duplicate email on create renders the flat message body; everything
/// else renders the camelCase error envelope.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with `{"message": "Not unique email"}`
    NotUniqueEmail,
    /// 404 envelope for the given request path
    NotFound { path: String },
    /// 500 envelope for the given request path
    Internal { path: String },
}

/// Body of 404/500 replies, shaped like a framework default error page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub timestamp: String,
    pub path: String,
    pub status: u16,
    pub error: String,
    pub request_id: String,
}

impl ErrorBody {
    fn new(status: StatusCode, path: String) -> Self {
        let mut request_id = Uuid::new_v4().simple().to_string();
        request_id.truncate(8);

        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            path,
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            request_id,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotUniqueEmail => (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse::new("Not unique email")),
            )
                .into_response(),
            ApiError::NotFound { path } => {
                let body = ErrorBody::new(StatusCode::NOT_FOUND, path);
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            ApiError::Internal { path } => {
                let body = ErrorBody::new(StatusCode::INTERNAL_SERVER_ERROR, path);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = ErrorBody::new(StatusCode::NOT_FOUND, "/users/9".to_string());
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Not Found");
        assert_eq!(body.request_id.len(), 8);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["path"], "/users/9");
        // Envelope keys are camelCase
        assert!(json.get("requestId").is_some());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_status_mapping() {
        let res = ApiError::NotUniqueEmail.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = ApiError::NotFound {
            path: "/users/9".to_string(),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = ApiError::Internal {
            path: "/users".to_string(),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
