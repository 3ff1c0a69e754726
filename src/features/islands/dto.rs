use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::validation::not_blank;

/// Request DTO for creating an island
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateIslandDto {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "Island name must not exceed 100 characters")
    )]
    pub island_name: String,
}

/// Request DTO for updating an island
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateIslandDto {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "Island name must not exceed 100 characters")
    )]
    pub island_name: String,
}

impl CreateIslandDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            island_name: name.into().trim().to_string(),
        }
    }
}

impl UpdateIslandDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            island_name: name.into().trim().to_string(),
        }
    }
}
