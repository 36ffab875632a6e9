//! Risk evaluation service.
//!
//! Orchestrates one evaluation: validate the attempt, read the account's
//! ledger, extract signals, classify, and append the attempt as a new ledger
//! row. Every evaluated attempt is appended regardless of its decision; a
//! FRAUD attempt is recorded too, so the next evaluation sees it.

use crate::policy::RiskPolicy;
use crate::signals::SignalBreakdown;
use crate::store::{HistoryStore, HistoryStoreError};
use chrono::{DateTime, Timelike, Utc};
use intelliid_core::AccountId;
use intelliid_db::{CreateLoginEvent, RiskStatus};
use std::sync::Arc;

/// One authentication attempt to evaluate.
#[derive(Debug, Clone)]
pub struct EvaluateLogin {
    /// Account the attempt targets.
    pub account_id: AccountId,
    /// Human-readable account identifier, stored for audit only.
    pub account_label: String,
    /// Opaque client fingerprint.
    pub device_fingerprint: String,
    /// Whether credential verification passed upstream.
    pub succeeded: bool,
    /// Best-effort client network address, `"unknown"` if unavailable.
    pub source_address: String,
    /// When the attempt occurred.
    pub occurred_at: DateTime<Utc>,
}

/// Outcome of one evaluation.
#[derive(Debug, Clone)]
pub struct RiskAssessment {
    /// Sum of the signal penalties.
    pub score: i32,
    /// Decision derived from the score.
    pub status: RiskStatus,
    /// Address echoed back from the request.
    pub source_address: String,
    /// Per-signal contributions, for logging and diagnostics.
    pub breakdown: SignalBreakdown,
}

/// Errors a risk evaluation can produce.
#[derive(Debug, thiserror::Error)]
pub enum RiskEvaluationError {
    /// The attempt is structurally invalid; nothing was read or written.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The ledger could not be read; the evaluation was aborted and
    /// nothing was appended.
    #[error("Failed to read login history: {0}")]
    HistoryRead(String),

    /// The score was computed but the attempt could not be appended. The
    /// evaluation still fails as a whole: an unrecorded attempt must not
    /// look like a clean one.
    #[error("Failed to record login event: {0}")]
    HistoryWrite(String),
}

impl From<HistoryStoreError> for RiskEvaluationError {
    fn from(err: HistoryStoreError) -> Self {
        match err {
            HistoryStoreError::Read(msg) => Self::HistoryRead(msg),
            HistoryStoreError::Write(msg) => Self::HistoryWrite(msg),
        }
    }
}

/// Service evaluating login attempts against the account's ledger.
///
/// Two concurrent evaluations for the same account can both read a history
/// that does not yet include the other attempt; both will still be appended.
/// That window is accepted, the ledger stays complete either way.
#[derive(Clone)]
pub struct RiskEvaluationService {
    store: Arc<dyn HistoryStore>,
    policy: RiskPolicy,
}

impl RiskEvaluationService {
    pub fn new(store: Arc<dyn HistoryStore>, policy: RiskPolicy) -> Self {
        Self { store, policy }
    }

    #[must_use]
    pub fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    /// Evaluate one attempt and append it to the ledger.
    ///
    /// Exactly one ledger append happens per successful evaluation. On a
    /// read failure nothing is appended; on a write failure the score was
    /// computed but the whole evaluation still reports failure.
    pub async fn evaluate(
        &self,
        input: EvaluateLogin,
    ) -> Result<RiskAssessment, RiskEvaluationError> {
        Self::validate(&input)?;

        let account_id = *input.account_id.as_uuid();
        let history = self.store.fetch_history(account_id).await.map_err(|e| {
            tracing::error!(account_id = %input.account_id, error = %e, "History read failed");
            RiskEvaluationError::from(e)
        })?;

        let breakdown = SignalBreakdown::extract(
            &self.policy,
            &input.device_fingerprint,
            input.occurred_at.hour(),
            &history,
        );
        let score = breakdown.total();
        let status = self.policy.classify(score);

        tracing::info!(
            account_id = %input.account_id,
            score,
            status = %status,
            device_novelty = breakdown.device_novelty,
            hour_deviation = breakdown.hour_deviation,
            failure_streak = breakdown.failure_streak,
            "Login attempt evaluated"
        );

        self.store
            .append(CreateLoginEvent {
                account_id,
                account_label: input.account_label,
                device_fingerprint: input.device_fingerprint,
                succeeded: input.succeeded,
                source_address: input.source_address.clone(),
                risk_score: score,
                status,
                occurred_at: input.occurred_at,
            })
            .await
            .map_err(|e| {
                tracing::error!(account_id = %input.account_id, error = %e, "History append failed");
                RiskEvaluationError::from(e)
            })?;

        Ok(RiskAssessment {
            score,
            status,
            source_address: input.source_address,
            breakdown,
        })
    }

    /// Structural validation, performed before any store access.
    fn validate(input: &EvaluateLogin) -> Result<(), RiskEvaluationError> {
        if input.account_label.trim().is_empty() {
            return Err(RiskEvaluationError::InvalidInput(
                "account_label must not be empty".to_string(),
            ));
        }
        if input.device_fingerprint.is_empty() {
            return Err(RiskEvaluationError::InvalidInput(
                "device_fingerprint must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
