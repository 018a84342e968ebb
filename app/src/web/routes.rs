// app/src/web/routes.rs

use actix_web::{error, web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::cart_handlers;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Body deserialization failures get the same `{error, message}` shape as every other error.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
  })
}

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(json_config())
    .route("/health", web::get().to(health_check_handler))
    // Cart Routes
    // Identity comes from the X-User-ID header set by the authentication layer,
    // or from the body `ownerId` when that fallback is enabled.
    .route("/adicionarItem", web::post().to(cart_handlers::add_item_handler))
    .route("/removerItem", web::post().to(cart_handlers::remove_item_handler))
    .route("/atualizarQuantidade", web::put().to(cart_handlers::set_quantity_handler))
    .service(
      web::resource("/carrinho/{owner_id}")
        .route(web::get().to(cart_handlers::get_cart_handler))
        .route(web::delete().to(cart_handlers::delete_cart_handler)),
    )
    .service(
      web::resource("/carrinho")
        .route(web::get().to(cart_handlers::missing_owner_handler))
        .route(web::delete().to(cart_handlers::missing_owner_handler)),
    )
    .service(
      web::resource("/carrinho/")
        .route(web::get().to(cart_handlers::missing_owner_handler))
        .route(web::delete().to(cart_handlers::missing_owner_handler)),
    );
}
