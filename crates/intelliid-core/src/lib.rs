//! Shared core types for IntelliID.
//!
//! Currently this crate only carries the strongly typed identifiers used
//! across the persistence and API crates.

pub mod ids;

pub use ids::{AccountId, ParseIdError};
