pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod queue;
pub mod wire;

#[cfg(test)]
pub(crate) mod test_support;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;

pub use application::enqueue_gateway::{EnqueueGateway, EnqueueReceipt};
pub use config::AppConfig;
pub use domain::errors::{EnqueueError, ValidationError};
pub use domain::sale::Sale;
pub use domain::validation::parse_sale;
pub use queue::{create_pool, QueuePool};

#[derive(OpenApi)]
#[openapi(
    paths(handlers::sales::submit_sale, handlers::health::health),
    components(schemas(
        domain::sale::Sale,
        errors::ErrorBody,
        handlers::sales::SubmitSaleResponse
    )),
    tags(
        (name = "sales", description = "Sale ingestion"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Register every route. The caller provides `web::Data<EnqueueGateway>`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sale", web::post().to(handlers::sales::submit_sale))
        .route("/health", web::get().to(handlers::health::health))
        .route(
            "/api-docs/openapi.json",
            web::get().to(handlers::openapi_json),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    gateway: EnqueueGateway,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(gateway.clone()))
            .wrap(Logger::default())
            .configure(routes)
    })
    .bind((host.to_string(), port))?
    .run())
}
