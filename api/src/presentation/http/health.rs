use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
    pub database: bool,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    security(()),
    responses(
        (status = 200, body = HealthResp),
        (status = 503, body = HealthResp, description = "Database unreachable")
    )
)]
pub async fn health(State(pool): State<PgPool>) -> (StatusCode, Json<HealthResp>) {
    let database = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await
        .is_ok();
    if database {
        (StatusCode::OK, Json(HealthResp { status: "ok", database }))
    } else {
        tracing::warn!("health_database_unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResp {
                status: "degraded",
                database,
            }),
        )
    }
}

pub fn routes(pool: PgPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
