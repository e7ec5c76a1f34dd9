//! Handlers for the `/api/products` resource.

use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::api::MessageResponse;
use crate::dto::products::{ListParams, SearchParams};
use crate::forms::products::{CreateProductForm, UpdateProductForm};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::products as products_service;

#[get("")]
pub async fn list_products(
    params: web::Query<ListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products_service::list_products(repo.get_ref(), params.into_inner()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => service_error_response(&err),
    }
}

#[post("")]
pub async fn create_product(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateProductForm>,
) -> impl Responder {
    match products_service::create_product(repo.get_ref(), form) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => service_error_response(&err),
    }
}

#[get("/search/query")]
pub async fn search_products(
    params: web::Query<SearchParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products_service::search_products(repo.get_ref(), params.into_inner()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => service_error_response(&err),
    }
}

#[get("/brands/all")]
pub async fn list_brands(repo: web::Data<DieselRepository>) -> impl Responder {
    match products_service::list_brands(repo.get_ref()) {
        Ok(brands) => HttpResponse::Ok().json(brands),
        Err(err) => service_error_response(&err),
    }
}

#[get("/{id}")]
pub async fn get_product(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products_service::get_product(repo.get_ref(), &id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => service_error_response(&err),
    }
}

#[put("/{id}")]
pub async fn update_product(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateProductForm>,
) -> impl Responder {
    match products_service::update_product(repo.get_ref(), &id, form) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => service_error_response(&err),
    }
}

#[delete("/{id}")]
pub async fn delete_product(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products_service::delete_product(repo.get_ref(), &id) {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Product deleted successfully")),
        Err(err) => service_error_response(&err),
    }
}
