//! Scoring policy: per-signal penalties and classification thresholds.
//!
//! All constants live here so the classifier can be tuned, or extended with
//! additional signals, without touching extractor code.

use intelliid_db::RiskStatus;
use serde::{Deserialize, Serialize};

/// Penalty applied when the attempt's fingerprint has never produced a
/// successful login for this account.
pub const DEFAULT_NEW_DEVICE_PENALTY: i32 = 40;

/// Penalty applied when the attempt's hour is outside the usual-hour window.
pub const DEFAULT_UNUSUAL_HOUR_PENALTY: i32 = 30;

/// Penalty applied when the most recent events are an unbroken failure run.
pub const DEFAULT_FAILURE_STREAK_PENALTY: i32 = 50;

/// Scores at or above this threshold classify as FRAUD.
pub const DEFAULT_FRAUD_THRESHOLD: i32 = 70;

/// Scores strictly above this threshold (and below the fraud threshold)
/// classify as SUSPICIOUS.
pub const DEFAULT_SUSPICIOUS_THRESHOLD: i32 = 30;

/// Maximum absolute hour distance still considered "usual".
pub const DEFAULT_USUAL_HOUR_WINDOW: i64 = 2;

/// Number of consecutive failures that triggers the streak penalty.
pub const DEFAULT_FAILURE_STREAK_LENGTH: usize = 3;

/// Tunable scoring policy for the risk engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// Penalty for an unknown device fingerprint.
    pub new_device_penalty: i32,
    /// Penalty for an attempt outside the account's usual hours.
    pub unusual_hour_penalty: i32,
    /// Penalty for a run of consecutive recent failures.
    pub failure_streak_penalty: i32,
    /// Score at or above which the attempt is classified FRAUD.
    pub fraud_threshold: i32,
    /// Score strictly above which the attempt is classified SUSPICIOUS.
    pub suspicious_threshold: i32,
    /// Absolute hour distance within which an hour counts as usual.
    /// The comparison is linear, not circular: 23 vs 1 is distance 22.
    pub usual_hour_window: i64,
    /// Consecutive failures required to trigger the streak penalty.
    pub failure_streak_length: usize,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            new_device_penalty: DEFAULT_NEW_DEVICE_PENALTY,
            unusual_hour_penalty: DEFAULT_UNUSUAL_HOUR_PENALTY,
            failure_streak_penalty: DEFAULT_FAILURE_STREAK_PENALTY,
            fraud_threshold: DEFAULT_FRAUD_THRESHOLD,
            suspicious_threshold: DEFAULT_SUSPICIOUS_THRESHOLD,
            usual_hour_window: DEFAULT_USUAL_HOUR_WINDOW,
            failure_streak_length: DEFAULT_FAILURE_STREAK_LENGTH,
        }
    }
}

impl RiskPolicy {
    /// Map a score to a decision. Thresholds are evaluated in priority
    /// order: fraud first, then suspicious, else safe.
    #[must_use]
    pub fn classify(&self, score: i32) -> RiskStatus {
        if score >= self.fraud_threshold {
            RiskStatus::Fraud
        } else if score > self.suspicious_threshold {
            RiskStatus::Suspicious
        } else {
            RiskStatus::Safe
        }
    }

    /// The highest score the current signal set can produce.
    #[must_use]
    pub fn max_score(&self) -> i32 {
        self.new_device_penalty + self.unusual_hour_penalty + self.failure_streak_penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_boundaries_are_exact() {
        let policy = RiskPolicy::default();
        assert_eq!(policy.classify(0), RiskStatus::Safe);
        assert_eq!(policy.classify(30), RiskStatus::Safe);
        assert_eq!(policy.classify(31), RiskStatus::Suspicious);
        assert_eq!(policy.classify(69), RiskStatus::Suspicious);
        assert_eq!(policy.classify(70), RiskStatus::Fraud);
        assert_eq!(policy.classify(120), RiskStatus::Fraud);
    }

    #[test]
    fn test_max_score_is_sum_of_penalties() {
        let policy = RiskPolicy::default();
        assert_eq!(policy.max_score(), 120);
    }

    #[test]
    fn test_tuned_thresholds_shift_classification() {
        let policy = RiskPolicy {
            fraud_threshold: 50,
            ..RiskPolicy::default()
        };
        assert_eq!(policy.classify(50), RiskStatus::Fraud);
        assert_eq!(policy.classify(49), RiskStatus::Suspicious);
    }
}
