use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::enqueue_gateway::EnqueueGateway;
use crate::errors::{AppError, ErrorBody};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub queue: String,
}

/// GET /health
///
/// Round trip to the queue store.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Queue store reachable", body = HealthResponse),
        (status = 500, description = "Queue store refused the check", body = ErrorBody),
        (status = 503, description = "Queue store unavailable", body = ErrorBody),
    ),
    tag = "health"
)]
pub async fn health(gateway: web::Data<EnqueueGateway>) -> Result<HttpResponse, AppError> {
    gateway
        .health()
        .await
        .inspect_err(|e| log::warn!("Health check failed: {}", e))?;

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        queue: gateway.queue().to_string(),
    }))
}
