//! HTTP mapping of planner-core errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Error returned by page handlers
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct AppError(#[from] pub planner_core::Error);

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        use planner_core::Error;

        match &self.0 {
            Error::MissingIdentity => (StatusCode::UNAUTHORIZED, "MISSING_IDENTITY"),
            Error::Http(_) | Error::Decode(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE"),
            e if e.is_upstream() => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        error!("Request failed ({}): {}", status, self.0);

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::Error;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::MissingIdentity, StatusCode::UNAUTHORIZED),
            (Error::Http("refused".into()), StatusCode::BAD_GATEWAY),
            (Error::api(500, "boom"), StatusCode::BAD_GATEWAY),
            (Error::NotFound("/api/sessions".into()), StatusCode::BAD_GATEWAY),
            (Error::Config("bad".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError(err).into_response().status(), expected);
        }
    }

    #[test]
    fn test_upstream_errors_are_bad_gateway() {
        let upstream = [
            Error::Http("refused".into()),
            Error::Decode("eof".into()),
            Error::api(503, "down"),
            Error::NotFound("/api/sessions".into()),
        ];
        for err in upstream {
            assert!(err.is_upstream());
            let (status, _) = AppError(err).status_and_code();
            assert_eq!(status, StatusCode::BAD_GATEWAY);
        }

        let (status, code) = AppError(Error::UnknownPolicy("Admin".into())).status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
    }
}
