//! Health check endpoint.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use sqlx::PgPool;

/// Liveness and readiness probe.
///
/// Reports degraded (503) when the database does not answer a trivial query.
pub async fn health_handler(State(pool): State<PgPool>) -> (StatusCode, Json<Value>) {
    let database = match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => "connected",
        Err(e) => {
            tracing::error!("Health check database probe failed: {e}");
            "unavailable"
        }
    };

    let status = if database == "connected" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "status": if status == StatusCode::OK { "healthy" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    });

    (status, Json(body))
}
