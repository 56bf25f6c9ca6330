use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::enqueue_gateway::EnqueueGateway;
use crate::domain::sale::Sale;
use crate::domain::validation::parse_sale;
use crate::errors::{AppError, ErrorBody};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSaleResponse {
    pub message: String,
    pub receipt_id: Uuid,
    pub queue: String,
    pub queue_length: u64,
}

/// POST /sale
///
/// Validates the sale and appends it to the sales queue. A 201 means the
/// store acknowledged the append; downstream processing happens later.
#[utoipa::path(
    post,
    path = "/sale",
    request_body = Sale,
    responses(
        (status = 201, description = "Sale pushed into the queue", body = SubmitSaleResponse),
        (status = 400, description = "Malformed or invalid sale", body = ErrorBody),
        (status = 500, description = "Queue store rejected the append", body = ErrorBody),
        (status = 503, description = "Queue store unavailable", body = ErrorBody),
    ),
    tag = "sales"
)]
pub async fn submit_sale(
    gateway: web::Data<EnqueueGateway>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let sale = parse_sale(&body).inspect_err(|e| log::warn!("Rejected sale: {}", e))?;

    let receipt = gateway.enqueue(&sale).await.inspect_err(|e| {
        log::error!("Failed to enqueue sale id={}: {}", sale.id, e);
    })?;

    log::info!(
        "Sale id={} enqueued on '{}' (receipt={}, length={})",
        sale.id,
        receipt.queue,
        receipt.receipt_id,
        receipt.queue_length
    );

    Ok(HttpResponse::Created().json(SubmitSaleResponse {
        message: "Sale successfully pushed into the queue".to_string(),
        receipt_id: receipt.receipt_id,
        queue: receipt.queue,
        queue_length: receipt.queue_length,
    }))
}
