//! Business logic services for risk evaluation.

pub mod risk_service;

pub use risk_service::{
    EvaluateLogin, RiskAssessment, RiskEvaluationError, RiskEvaluationService,
};
