//! Database models.

pub mod login_event;

pub use login_event::{CreateLoginEvent, LoginEvent, RiskStatus};
