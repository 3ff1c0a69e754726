use serde::{Deserialize, Serialize};

use crate::features::brands::dto::{CreateBrandDto, UpdateBrandDto};
use crate::features::crud::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub brand_id: String,
    pub brand_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_name: Option<String>,
}

pub struct BrandResource;

impl Resource for BrandResource {
    type Item = Brand;
    type Create = CreateBrandDto;
    type Update = UpdateBrandDto;

    const ENDPOINT: &'static str = "brand";
    const LABEL: &'static str = "brand";

    fn id(item: &Brand) -> &str {
        &item.brand_id
    }

    fn name(item: &Brand) -> Option<&str> {
        Some(&item.brand_name)
    }

    fn create_name(dto: &CreateBrandDto) -> Option<&str> {
        Some(&dto.brand_name)
    }

    fn update_name(dto: &UpdateBrandDto) -> Option<&str> {
        Some(&dto.brand_name)
    }
}
