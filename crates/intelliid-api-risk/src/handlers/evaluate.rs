//! Login evaluation handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;

use crate::error::ApiRiskError;
use crate::models::{EvaluateLoginRequest, EvaluateLoginResponse};
use crate::router::RiskState;
use crate::services::EvaluateLogin;

/// Fallback recorded when the client address cannot be determined.
pub const UNKNOWN_SOURCE_ADDRESS: &str = "unknown";

/// Evaluate one authentication attempt and append it to the ledger.
///
/// The body extractor's rejection is mapped into the API error type so a
/// malformed or incomplete body gets the same `{error}` response shape as
/// every other failure.
pub async fn evaluate_login(
    State(state): State<RiskState>,
    headers: HeaderMap,
    payload: Result<Json<EvaluateLoginRequest>, JsonRejection>,
) -> Result<Json<EvaluateLoginResponse>, ApiRiskError> {
    let Json(request) = payload.map_err(|e| ApiRiskError::Validation(e.body_text()))?;

    let assessment = state
        .service
        .evaluate(EvaluateLogin {
            account_id: request.account_id,
            account_label: request.account_label,
            device_fingerprint: request.device_fingerprint,
            succeeded: request.succeeded,
            source_address: source_address(&headers),
            occurred_at: Utc::now(),
        })
        .await?;

    Ok(Json(assessment.into()))
}

/// Best-effort client address from `x-forwarded-for`.
///
/// The header value is recorded verbatim; a missing or non-ASCII value maps
/// to [`UNKNOWN_SOURCE_ADDRESS`].
fn source_address(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map_or_else(|| UNKNOWN_SOURCE_ADDRESS.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_missing_forwarded_for_is_unknown() {
        assert_eq!(source_address(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn test_forwarded_for_is_recorded_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 198.51.100.2"),
        );
        assert_eq!(source_address(&headers), "203.0.113.7, 198.51.100.2");
    }
}
