//! Login event model for the risk-evaluation audit ledger.
//!
//! Records every evaluated authentication attempt (successful and failed)
//! together with the risk score and decision computed for it. Rows are
//! immutable: the engine only inserts and reads, never updates or deletes.

use crate::error::DbError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Decision computed by the risk engine for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskStatus {
    /// Attempt matches the account's known pattern.
    Safe,
    /// Attempt deviates enough to warrant additional verification.
    Suspicious,
    /// Attempt deviates strongly; the caller should deny access.
    Fraud,
}

impl RiskStatus {
    /// Convert to database string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Suspicious => "SUSPICIOUS",
            Self::Fraud => "FRAUD",
        }
    }

    /// Parse from database string representation.
    ///
    /// Unknown strings map to `Suspicious` so a corrupted row is never
    /// silently read back as safe.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "SAFE" => Self::Safe,
            "FRAUD" => Self::Fraud,
            _ => Self::Suspicious,
        }
    }
}

impl std::fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One persisted authentication attempt with its computed score and decision.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LoginEvent {
    /// Unique identifier for this event.
    pub id: Uuid,

    /// The account the attempt was made against.
    pub account_id: Uuid,

    /// Human-readable identifier (e.g. the email used). Audit only,
    /// never used in scoring.
    pub account_label: String,

    /// Opaque client fingerprint, equality-compared and never parsed.
    pub device_fingerprint: String,

    /// Whether credential verification passed.
    pub succeeded: bool,

    /// Best-effort client network address, `"unknown"` if unavailable.
    pub source_address: String,

    /// Risk score computed by the engine for this attempt.
    pub risk_score: i32,

    /// Decision string: `SAFE`, `SUSPICIOUS` or `FRAUD`.
    pub status: String,

    /// When the attempt occurred.
    pub occurred_at: DateTime<Utc>,
}

impl LoginEvent {
    /// Get the decision as a typed enum.
    #[must_use]
    pub fn decision(&self) -> RiskStatus {
        RiskStatus::parse(&self.status)
    }
}

/// Input for recording a new login event.
#[derive(Debug, Clone)]
pub struct CreateLoginEvent {
    pub account_id: Uuid,
    pub account_label: String,
    pub device_fingerprint: String,
    pub succeeded: bool,
    pub source_address: String,
    pub risk_score: i32,
    pub status: RiskStatus,
    pub occurred_at: DateTime<Utc>,
}

impl LoginEvent {
    /// Append one event to the ledger.
    pub async fn create<'e, E>(executor: E, input: CreateLoginEvent) -> Result<Self, DbError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            INSERT INTO login_events (
                account_id, account_label, device_fingerprint, succeeded,
                source_address, risk_score, status, occurred_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            ",
        )
        .bind(input.account_id)
        .bind(&input.account_label)
        .bind(&input.device_fingerprint)
        .bind(input.succeeded)
        .bind(&input.source_address)
        .bind(input.risk_score)
        .bind(input.status.as_str())
        .bind(input.occurred_at)
        .fetch_one(executor)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Get the full history for an account, most recent first.
    ///
    /// Returns an empty vec (not an error) for a first-ever attempt.
    pub async fn fetch_history<'e, E>(
        executor: E,
        account_id: Uuid,
    ) -> Result<Vec<Self>, DbError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            SELECT * FROM login_events
            WHERE account_id = $1
            ORDER BY occurred_at DESC
            ",
        )
        .bind(account_id)
        .fetch_all(executor)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Get the most recent events for an account, bounded for audit listing.
    pub async fn recent_for_account<'e, E>(
        executor: E,
        account_id: Uuid,
        limit: i32,
    ) -> Result<Vec<Self>, DbError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            SELECT * FROM login_events
            WHERE account_id = $1
            ORDER BY occurred_at DESC
            LIMIT $2
            ",
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(executor)
        .await
        .map_err(DbError::QueryFailed)
    }

    /// Count total events recorded for an account.
    pub async fn count_for_account<'e, E>(
        executor: E,
        account_id: Uuid,
    ) -> Result<i64, DbError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let row: (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(*) FROM login_events
            WHERE account_id = $1
            ",
        )
        .bind(account_id)
        .fetch_one(executor)
        .await
        .map_err(DbError::QueryFailed)?;

        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_status_roundtrip() {
        let statuses = [RiskStatus::Safe, RiskStatus::Suspicious, RiskStatus::Fraud];

        for status in statuses {
            let s = status.as_str();
            let parsed = RiskStatus::parse(s);
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_risk_status_display() {
        assert_eq!(RiskStatus::Safe.to_string(), "SAFE");
        assert_eq!(RiskStatus::Fraud.to_string(), "FRAUD");
    }

    #[test]
    fn test_unknown_status_parses_as_suspicious() {
        assert_eq!(RiskStatus::parse("garbage"), RiskStatus::Suspicious);
    }

    #[test]
    fn test_decision_accessor() {
        let event = LoginEvent {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            account_label: "user@example.com".to_string(),
            device_fingerprint: "fp".to_string(),
            succeeded: true,
            source_address: "unknown".to_string(),
            risk_score: 40,
            status: "SUSPICIOUS".to_string(),
            occurred_at: Utc::now(),
        };
        assert_eq!(event.decision(), RiskStatus::Suspicious);
    }
}
