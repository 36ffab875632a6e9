//! Login history audit listing handler.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::ApiRiskError;
use crate::models::{LoginHistoryResponse, LoginEventResponse};
use crate::router::RiskState;
use crate::services::RiskEvaluationError;
use intelliid_core::AccountId;

const DEFAULT_LIMIT: i32 = 20;
const MAX_LIMIT: i32 = 100;

/// Query parameters for the history listing.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of events to return, clamped to `1..=100`.
    pub limit: Option<i32>,
}

/// List the most recent ledger entries for an account, newest first.
pub async fn login_history(
    State(state): State<RiskState>,
    Path(account_id): Path<AccountId>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<LoginHistoryResponse>, ApiRiskError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let account_id = *account_id.as_uuid();

    let items = state
        .store
        .recent(account_id, limit)
        .await
        .map_err(RiskEvaluationError::from)?;
    let total = state
        .store
        .count(account_id)
        .await
        .map_err(RiskEvaluationError::from)?;

    Ok(Json(LoginHistoryResponse {
        items: items.into_iter().map(LoginEventResponse::from).collect(),
        total,
    }))
}
