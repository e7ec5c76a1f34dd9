//! HTTP routes of the catalog API.

use actix_web::{HttpResponse, error::InternalError, web};

use crate::dto::api::MessageResponse;
use crate::services::ServiceError;

pub mod products;

/// Maps a service failure to its status code and `{message}` body.
pub fn service_error_response(err: &ServiceError) -> HttpResponse {
    let body = MessageResponse::new(err.to_string());
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Validation(_) => HttpResponse::BadRequest().json(body),
        ServiceError::Store(_) => HttpResponse::InternalServerError().json(body),
    }
}

/// Rejects malformed JSON bodies with the same `{message}` envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(MessageResponse::new(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// Registers the `/api/products` scope.
///
/// Fixed paths are registered before `/{id}` so they are not captured by it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/products")
            .app_data(json_config())
            .service(products::list_products)
            .service(products::create_product)
            .service(products::search_products)
            .service(products::list_brands)
            .service(products::get_product)
            .service(products::update_product)
            .service(products::delete_product),
    );
}
