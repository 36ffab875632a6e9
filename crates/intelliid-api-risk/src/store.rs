//! History store seam between the risk engine and persistence.
//!
//! The engine only needs two operations: read an account's prior events and
//! append the evaluated attempt. Putting them behind a trait keeps the
//! service testable without a database; production wires in [`PgHistoryStore`].

use async_trait::async_trait;
use intelliid_db::{CreateLoginEvent, LoginEvent};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Errors surfaced by a history store.
#[derive(Debug, thiserror::Error)]
pub enum HistoryStoreError {
    /// Reading the account's prior events failed.
    #[error("Failed to read login history: {0}")]
    Read(String),

    /// Appending the evaluated event failed.
    #[error("Failed to append login event: {0}")]
    Write(String),
}

/// Read/append access to the per-account login ledger.
///
/// `fetch_history` must return events most recent first and must not include
/// the attempt currently being evaluated (it has not been appended yet).
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// All prior events for the account, ordered by `occurred_at` descending.
    async fn fetch_history(&self, account_id: Uuid) -> Result<Vec<LoginEvent>, HistoryStoreError>;

    /// Append one evaluated event to the ledger and return the stored row.
    async fn append(&self, event: CreateLoginEvent) -> Result<LoginEvent, HistoryStoreError>;

    /// The most recent events for the account, bounded for audit listing.
    ///
    /// The default implementation truncates a full history read; backends
    /// with a cheaper bounded query should override it.
    async fn recent(
        &self,
        account_id: Uuid,
        limit: i32,
    ) -> Result<Vec<LoginEvent>, HistoryStoreError> {
        let mut history = self.fetch_history(account_id).await?;
        history.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(history)
    }

    /// Total events recorded for the account.
    async fn count(&self, account_id: Uuid) -> Result<i64, HistoryStoreError> {
        let history = self.fetch_history(account_id).await?;
        Ok(history.len() as i64)
    }
}

/// Postgres-backed history store.
#[derive(Debug, Clone)]
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn fetch_history(&self, account_id: Uuid) -> Result<Vec<LoginEvent>, HistoryStoreError> {
        LoginEvent::fetch_history(&self.pool, account_id)
            .await
            .map_err(|e| HistoryStoreError::Read(e.to_string()))
    }

    async fn append(&self, event: CreateLoginEvent) -> Result<LoginEvent, HistoryStoreError> {
        LoginEvent::create(&self.pool, event)
            .await
            .map_err(|e| HistoryStoreError::Write(e.to_string()))
    }

    async fn recent(
        &self,
        account_id: Uuid,
        limit: i32,
    ) -> Result<Vec<LoginEvent>, HistoryStoreError> {
        LoginEvent::recent_for_account(&self.pool, account_id, limit)
            .await
            .map_err(|e| HistoryStoreError::Read(e.to_string()))
    }

    async fn count(&self, account_id: Uuid) -> Result<i64, HistoryStoreError> {
        LoginEvent::count_for_account(&self.pool, account_id)
            .await
            .map_err(|e| HistoryStoreError::Read(e.to_string()))
    }
}

/// In-memory history store keyed by account id.
///
/// Used by tests and local experimentation; events are kept in insertion
/// order and re-sorted on read so the descending contract holds.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    events: Mutex<HashMap<Uuid, Vec<LoginEvent>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events for an account.
    pub fn event_count(&self, account_id: Uuid) -> usize {
        self.events
            .lock()
            .unwrap()
            .get(&account_id)
            .map_or(0, Vec::len)
    }

    /// Seed a pre-existing event, bypassing evaluation.
    pub fn seed(&self, event: LoginEvent) {
        self.events
            .lock()
            .unwrap()
            .entry(event.account_id)
            .or_default()
            .push(event);
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn fetch_history(&self, account_id: Uuid) -> Result<Vec<LoginEvent>, HistoryStoreError> {
        let events = self.events.lock().unwrap();
        let mut history = events.get(&account_id).cloned().unwrap_or_default();
        history.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Ok(history)
    }

    async fn append(&self, event: CreateLoginEvent) -> Result<LoginEvent, HistoryStoreError> {
        let stored = LoginEvent {
            id: Uuid::new_v4(),
            account_id: event.account_id,
            account_label: event.account_label,
            device_fingerprint: event.device_fingerprint,
            succeeded: event.succeeded,
            source_address: event.source_address,
            risk_score: event.risk_score,
            status: event.status.as_str().to_string(),
            occurred_at: event.occurred_at,
        };
        self.events
            .lock()
            .unwrap()
            .entry(stored.account_id)
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use intelliid_db::RiskStatus;

    fn input(account_id: Uuid, age_minutes: i64) -> CreateLoginEvent {
        CreateLoginEvent {
            account_id,
            account_label: "user@example.com".to_string(),
            device_fingerprint: "fp-1".to_string(),
            succeeded: true,
            source_address: "203.0.113.7".to_string(),
            risk_score: 0,
            status: RiskStatus::Safe,
            occurred_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn test_in_memory_append_and_fetch() {
        let store = InMemoryHistoryStore::new();
        let account_id = Uuid::new_v4();

        store.append(input(account_id, 0)).await.unwrap();
        let history = store.fetch_history(account_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].account_id, account_id);
        assert_eq!(store.event_count(account_id), 1);
    }

    #[tokio::test]
    async fn test_in_memory_history_is_descending() {
        let store = InMemoryHistoryStore::new();
        let account_id = Uuid::new_v4();

        // Insert oldest first; the read must still come back newest first.
        store.append(input(account_id, 30)).await.unwrap();
        store.append(input(account_id, 10)).await.unwrap();
        store.append(input(account_id, 20)).await.unwrap();

        let history = store.fetch_history(account_id).await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history[0].occurred_at > history[1].occurred_at);
        assert!(history[1].occurred_at > history[2].occurred_at);
    }

    #[tokio::test]
    async fn test_recent_respects_the_limit() {
        let store = InMemoryHistoryStore::new();
        let account_id = Uuid::new_v4();

        for age in [30, 20, 10] {
            store.append(input(account_id, age)).await.unwrap();
        }

        let recent = store.recent(account_id, 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert!(recent[0].occurred_at > recent[1].occurred_at);
        assert_eq!(store.count(account_id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_in_memory_accounts_are_isolated() {
        let store = InMemoryHistoryStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.append(input(a, 0)).await.unwrap();
        assert_eq!(store.fetch_history(b).await.unwrap().len(), 0);
    }
}
