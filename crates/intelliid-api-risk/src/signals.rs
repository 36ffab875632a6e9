//! Signal extractors: independent heuristics over the account's login history.
//!
//! Each extractor is a pure function from `(current attempt, history)` to a
//! penalty contribution. History must be ordered most recent first; the
//! novelty and hour extractors only look at successful events, while the
//! streak extractor walks the full history.

use crate::policy::RiskPolicy;
use chrono::Timelike;
use intelliid_db::LoginEvent;
use serde::Serialize;
use std::collections::HashSet;

/// Per-signal penalty contributions for one evaluated attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalBreakdown {
    /// Penalty from the device-novelty signal.
    pub device_novelty: i32,
    /// Penalty from the hour-of-day deviation signal.
    pub hour_deviation: i32,
    /// Penalty from the consecutive-failure-streak signal.
    pub failure_streak: i32,
}

impl SignalBreakdown {
    /// Total risk score: the plain integer sum of the three signals.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.device_novelty + self.hour_deviation + self.failure_streak
    }

    /// Run all extractors against the history.
    #[must_use]
    pub fn extract(
        policy: &RiskPolicy,
        device_fingerprint: &str,
        attempt_hour: u32,
        history: &[LoginEvent],
    ) -> Self {
        Self {
            device_novelty: device_novelty_penalty(policy, device_fingerprint, history),
            hour_deviation: hour_deviation_penalty(policy, attempt_hour, history),
            failure_streak: failure_streak_penalty(policy, history),
        }
    }
}

/// Device novelty: penalize fingerprints that never produced a successful
/// login for this account. An empty baseline (first-ever attempt) always
/// penalizes: there is no history to match against.
#[must_use]
pub fn device_novelty_penalty(
    policy: &RiskPolicy,
    device_fingerprint: &str,
    history: &[LoginEvent],
) -> i32 {
    let known_devices: HashSet<&str> = history
        .iter()
        .filter(|e| e.succeeded)
        .map(|e| e.device_fingerprint.as_str())
        .collect();

    if known_devices.contains(device_fingerprint) {
        0
    } else {
        tracing::debug!(fingerprint_known = false, "Unknown device fingerprint");
        policy.new_device_penalty
    }
}

/// Hour-of-day deviation: penalize attempts whose hour is not within
/// `usual_hour_window` of any hour seen on a successful login. With no
/// successful history the signal contributes nothing.
///
/// Hour distance is linear, not circular: 23 vs 1 is distance 22, not 2.
#[must_use]
pub fn hour_deviation_penalty(
    policy: &RiskPolicy,
    attempt_hour: u32,
    history: &[LoginEvent],
) -> i32 {
    let usual_hours: Vec<i64> = history
        .iter()
        .filter(|e| e.succeeded)
        .map(|e| i64::from(e.occurred_at.hour()))
        .collect();

    if usual_hours.is_empty() {
        return 0;
    }

    let attempt_hour = i64::from(attempt_hour);
    let is_usual = usual_hours
        .iter()
        .any(|h| (h - attempt_hour).abs() <= policy.usual_hour_window);

    if is_usual {
        0
    } else {
        policy.unusual_hour_penalty
    }
}

/// Failure streak: count consecutive failed events from the most recent
/// backwards, stopping at the first success. Only the unbroken run
/// immediately preceding "now" counts, not failures scattered through
/// history.
#[must_use]
pub fn failure_streak_penalty(policy: &RiskPolicy, history: &[LoginEvent]) -> i32 {
    let mut recent_failures = 0usize;
    for event in history {
        if event.succeeded {
            break;
        }
        recent_failures += 1;
    }

    if recent_failures >= policy.failure_streak_length {
        policy.failure_streak_penalty
    } else {
        0
    }
}
