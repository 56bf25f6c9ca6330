pub mod health;
pub mod sales;

use actix_web::HttpResponse;
use utoipa::OpenApi;

use crate::ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
