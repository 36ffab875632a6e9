//! API error types for the risk endpoints.

use crate::services::RiskEvaluationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error response body.
///
/// Every non-2xx response carries this single-field shape; callers branch on
/// the HTTP status and read `error` for diagnostics.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Risk API error type.
#[derive(Debug, Error)]
pub enum ApiRiskError {
    /// Domain error from the evaluation service.
    #[error(transparent)]
    Evaluation(#[from] RiskEvaluationError),

    /// Validation error raised at the HTTP boundary.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl IntoResponse for ApiRiskError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Evaluation(e) => match e {
                RiskEvaluationError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, msg.clone())
                }
                RiskEvaluationError::HistoryRead(_) => {
                    tracing::error!("RiskEvaluationError::HistoryRead: {e}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to read login history".to_string(),
                    )
                }
                RiskEvaluationError::HistoryWrite(_) => {
                    tracing::error!("RiskEvaluationError::HistoryWrite: {e}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to record login event".to_string(),
                    )
                }
            },
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let err = ApiRiskError::from(RiskEvaluationError::InvalidInput(
            "device_fingerprint must not be empty".to_string(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_failures_map_to_internal_error() {
        for err in [
            RiskEvaluationError::HistoryRead("boom".to_string()),
            RiskEvaluationError::HistoryWrite("boom".to_string()),
        ] {
            let response = ApiRiskError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_error_body_has_single_error_field() {
        let body = serde_json::to_value(ErrorResponse {
            error: "bad".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "error": "bad" }));
    }
}
