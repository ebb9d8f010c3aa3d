use crate::SERVICE_NAME;
use axum::Json;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");

    Json(HealthResponse {
        status: "OK".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
