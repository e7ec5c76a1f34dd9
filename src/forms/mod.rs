//! Request payloads accepted by the catalog API.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod products;

/// Fields reported first when several are invalid at once.
const FIELD_PRIORITY: [&str; 2] = ["title", "price"];

/// Picks the most relevant human-readable message out of `errors`.
fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    FIELD_PRIORITY
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .chain(field_errors.values())
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

#[derive(Debug, Error)]
/// Errors that can occur when processing request payloads.
pub enum FormError {
    #[error("{}", first_message(.0))]
    Validation(#[from] ValidationErrors),

    #[error("Title is required")]
    TitleRequired,

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("{0}")]
    Constraint(#[from] TypeConstraintError),
}
