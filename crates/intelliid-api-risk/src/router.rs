//! Router configuration for the risk API.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{evaluate, history};
use crate::policy::RiskPolicy;
use crate::services::RiskEvaluationService;
use crate::store::HistoryStore;

/// Shared state for the risk API.
#[derive(Clone)]
pub struct RiskState {
    pub service: RiskEvaluationService,
    pub store: Arc<dyn HistoryStore>,
}

impl RiskState {
    pub fn new(store: Arc<dyn HistoryStore>, policy: RiskPolicy) -> Self {
        Self {
            service: RiskEvaluationService::new(store.clone(), policy),
            store,
        }
    }
}

/// Build the risk API router. Mounted under `/risk` by the binary.
pub fn risk_router(state: RiskState) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate::evaluate_login))
        .route("/history/:account_id", get(history::login_history))
        .with_state(state)
}
