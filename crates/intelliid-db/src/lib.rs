//! Persistence layer for the IntelliID login-event ledger.
//!
//! Provides the `login_events` table model, embedded SQL migrations, and a
//! unified error type wrapping `sqlx` failures.

pub mod error;
pub mod migrations;
pub mod models;

pub use error::DbError;
pub use migrations::run_migrations;
pub use models::{CreateLoginEvent, LoginEvent, RiskStatus};
