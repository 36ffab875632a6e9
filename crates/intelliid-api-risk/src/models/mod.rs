//! Request and response models for the risk endpoints.

pub mod requests;
pub mod responses;

pub use requests::EvaluateLoginRequest;
pub use responses::{EvaluateLoginResponse, LoginEventResponse, LoginHistoryResponse};
