pub mod errors;
pub mod products;
pub mod seed;

pub use errors::{ServiceError, ServiceResult};
