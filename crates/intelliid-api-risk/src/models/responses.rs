//! Response models for the risk endpoints.

use crate::services::RiskAssessment;
use chrono::{DateTime, Utc};
use intelliid_db::{LoginEvent, RiskStatus};
use serde::Serialize;
use uuid::Uuid;

/// Response body for a completed evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluateLoginResponse {
    /// Sum of the signal penalties.
    pub score: i32,
    /// `SAFE`, `SUSPICIOUS` or `FRAUD`.
    pub status: RiskStatus,
    /// Address the attempt was evaluated with, `"unknown"` if unavailable.
    pub source_address: String,
}

impl From<RiskAssessment> for EvaluateLoginResponse {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            score: assessment.score,
            status: assessment.status,
            source_address: assessment.source_address,
        }
    }
}

/// One ledger row in a history listing.
#[derive(Debug, Clone, Serialize)]
pub struct LoginEventResponse {
    pub id: Uuid,
    pub account_label: String,
    pub device_fingerprint: String,
    pub succeeded: bool,
    pub source_address: String,
    pub risk_score: i32,
    pub status: RiskStatus,
    pub occurred_at: DateTime<Utc>,
}

impl From<LoginEvent> for LoginEventResponse {
    fn from(event: LoginEvent) -> Self {
        let status = event.decision();
        Self {
            id: event.id,
            account_label: event.account_label,
            device_fingerprint: event.device_fingerprint,
            succeeded: event.succeeded,
            source_address: event.source_address,
            risk_score: event.risk_score,
            status,
            occurred_at: event.occurred_at,
        }
    }
}

/// Response body for the history listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginHistoryResponse {
    /// Most recent events first, bounded by the request limit.
    pub items: Vec<LoginEventResponse>,
    /// Total events recorded for the account, independent of the limit.
    pub total: i64,
}
