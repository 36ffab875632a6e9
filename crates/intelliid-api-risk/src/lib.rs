//! Risk evaluation API for IntelliID.
//!
//! This crate provides the login risk engine and its REST endpoints:
//! - Risk evaluation (POST /risk/evaluate)
//! - Login history audit listing (GET /risk/history/:account_id)
//!
//! The engine compares one authentication attempt against the account's
//! prior login ledger, sums penalties from three independent signals
//! (device novelty, hour-of-day deviation, failure streak), classifies the
//! total via fixed thresholds, and appends the attempt to the ledger.
//!
//! # Example
//!
//! ```rust,ignore
//! use intelliid_api_risk::{risk_router, RiskState};
//! use axum::Router;
//!
//! let app = Router::new().nest("/risk", risk_router(state));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod router;
pub mod services;
pub mod signals;
pub mod store;

pub use error::ApiRiskError;
pub use models::{
    EvaluateLoginRequest, EvaluateLoginResponse, LoginEventResponse, LoginHistoryResponse,
};
pub use policy::RiskPolicy;
pub use router::{risk_router, RiskState};
pub use services::{EvaluateLogin, RiskAssessment, RiskEvaluationError, RiskEvaluationService};
pub use signals::SignalBreakdown;
pub use store::{HistoryStore, HistoryStoreError, InMemoryHistoryStore, PgHistoryStore};
