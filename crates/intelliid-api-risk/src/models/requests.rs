//! Request models for the risk endpoints.

use intelliid_core::AccountId;
use serde::Deserialize;

/// Request body for evaluating one authentication attempt.
///
/// The client's network address is not part of the body; it is taken from
/// the `x-forwarded-for` header. The event timestamp is assigned server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateLoginRequest {
    /// Account the attempt targets.
    pub account_id: AccountId,
    /// Human-readable account identifier (e.g. the email used).
    pub account_label: String,
    /// Opaque client fingerprint; compared for equality, never parsed.
    pub device_fingerprint: String,
    /// Whether credential verification passed upstream.
    pub succeeded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_evaluate_request() {
        let json = r#"{
            "account_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "account_label": "user@example.com",
            "device_fingerprint": "fp-abc",
            "succeeded": true
        }"#;

        let request: EvaluateLoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.account_label, "user@example.com");
        assert!(request.succeeded);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{
            "account_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "succeeded": true
        }"#;

        assert!(serde_json::from_str::<EvaluateLoginRequest>(json).is_err());
    }

    #[test]
    fn test_malformed_account_id_is_rejected() {
        let json = r#"{
            "account_id": "not-a-uuid",
            "account_label": "user@example.com",
            "device_fingerprint": "fp-abc",
            "succeeded": true
        }"#;

        assert!(serde_json::from_str::<EvaluateLoginRequest>(json).is_err());
    }
}
