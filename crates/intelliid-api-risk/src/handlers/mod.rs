//! HTTP handlers for the risk endpoints.

pub mod evaluate;
pub mod history;
