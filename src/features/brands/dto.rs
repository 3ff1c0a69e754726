use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::validation::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBrandDto {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "Brand name must not exceed 100 characters")
    )]
    pub brand_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateBrandDto {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "Brand name must not exceed 100 characters")
    )]
    pub brand_name: String,
}

impl CreateBrandDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            brand_name: name.into().trim().to_string(),
        }
    }
}

impl UpdateBrandDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            brand_name: name.into().trim().to_string(),
        }
    }
}
