use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::features::products::model::ProductSpecification;
use crate::shared::validation::not_blank;

fn non_negative_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("price").with_message("Price cannot be negative".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductDto {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "Product name must not exceed 200 characters")
    )]
    pub product_name: String,
    pub brand_id: Option<String>,
    #[validate(custom(function = "non_negative_price"))]
    pub price: Option<Decimal>,
    pub unit: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub specifications: Vec<ProductSpecification>,
}

pub type UpdateProductDto = CreateProductDto;
