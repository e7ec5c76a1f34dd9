use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::domain::types::{Price, ProductTitle, parse_number_prefix};
use crate::forms::FormError;

/// Price as sent by clients: a JSON number or a numeric string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    /// Parses leniently: strings keep their numeric prefix and anything that
    /// is not a finite number becomes `0`.
    pub fn lenient_value(&self) -> f64 {
        let value = match self {
            PriceInput::Number(value) => *value,
            PriceInput::Text(text) => parse_number_prefix(text).unwrap_or(0.0),
        };
        if value.is_finite() { value } else { 0.0 }
    }

    /// Returns the price to store on update, or `None` when the input is falsy
    /// (`0`, `NaN`, or an empty string) and the stored price must stay.
    pub fn update_value(&self) -> Result<Option<f64>, FormError> {
        match self {
            PriceInput::Number(value) if *value == 0.0 || value.is_nan() => Ok(None),
            PriceInput::Number(value) => Ok(Some(*value)),
            PriceInput::Text(text) if text.is_empty() => Ok(None),
            PriceInput::Text(text) => parse_number_prefix(text)
                .map(Some)
                .ok_or_else(|| FormError::InvalidPrice(text.clone())),
        }
    }
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
/// Payload of `POST /api/products`.
pub struct CreateProductForm {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[validate(required(message = "Price is required"))]
    pub price: Option<PriceInput>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
/// Payload of `PUT /api/products/{id}`; falsy fields are ignored.
pub struct UpdateProductForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceInput>,
}

impl TryFrom<CreateProductForm> for NewProduct {
    type Error = FormError;

    fn try_from(form: CreateProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let title = form
            .title
            .map(ProductTitle::new)
            .transpose()
            .map_err(|_| FormError::TitleRequired)?
            .ok_or(FormError::TitleRequired)?;
        let price = form
            .price
            .as_ref()
            .map(PriceInput::lenient_value)
            .unwrap_or_default();

        Ok(NewProduct::new(
            title,
            form.description.unwrap_or_default(),
            form.brand.unwrap_or_default(),
            Price::new(price)?,
        ))
    }
}

impl TryFrom<UpdateProductForm> for UpdateProduct {
    type Error = FormError;

    fn try_from(form: UpdateProductForm) -> Result<Self, Self::Error> {
        let title = form
            .title
            .filter(|title| !title.is_empty())
            .map(|title| ProductTitle::new(title).map_err(|_| FormError::TitleRequired))
            .transpose()?;

        let price = match &form.price {
            Some(input) => input.update_value()?.map(Price::new).transpose()?,
            None => None,
        };

        let non_empty = |value: Option<String>| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| v.trim().to_string())
        };

        Ok(UpdateProduct {
            title,
            description: non_empty(form.description),
            brand: non_empty(form.brand),
            price,
        })
    }
}
