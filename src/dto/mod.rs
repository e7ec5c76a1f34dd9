//! DTO modules shared by the HTTP handlers and the catalog client.

pub mod api;
pub mod products;
