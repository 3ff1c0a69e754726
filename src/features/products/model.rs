use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::features::crud::Resource;
use crate::features::products::dto::{CreateProductDto, UpdateProductDto};

/// Name/value pair describing a product (capacity, engine, dimensions...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpecification {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub specifications: Vec<ProductSpecification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_name: Option<String>,
}

pub struct ProductResource;

impl Resource for ProductResource {
    type Item = Product;
    type Create = CreateProductDto;
    type Update = UpdateProductDto;

    const ENDPOINT: &'static str = "product";
    const LABEL: &'static str = "product";

    fn id(item: &Product) -> &str {
        &item.product_id
    }

    fn name(item: &Product) -> Option<&str> {
        Some(&item.product_name)
    }

    fn create_name(dto: &CreateProductDto) -> Option<&str> {
        Some(&dto.product_name)
    }

    fn update_name(dto: &UpdateProductDto) -> Option<&str> {
        Some(&dto.product_name)
    }
}
