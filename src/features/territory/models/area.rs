use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::crud::Resource;
use crate::features::territory::models::RecordStatus;
use crate::shared::validation::{not_blank, territory_code};

/// Area within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub area_id: String,
    pub area_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_code: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
    pub group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAreaDto {
    #[validate(custom(function = "not_blank"))]
    pub area_name: String,
    #[validate(custom(function = "territory_code"))]
    pub area_code: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub group_id: String,
    #[serde(default)]
    pub status: RecordStatus,
}

pub type UpdateAreaDto = CreateAreaDto;

pub struct AreaResource;

impl Resource for AreaResource {
    type Item = Area;
    type Create = CreateAreaDto;
    type Update = UpdateAreaDto;

    const ENDPOINT: &'static str = "area";
    const LABEL: &'static str = "area";

    fn id(item: &Area) -> &str {
        &item.area_id
    }

    fn name(item: &Area) -> Option<&str> {
        Some(&item.area_name)
    }

    fn create_name(dto: &CreateAreaDto) -> Option<&str> {
        Some(&dto.area_name)
    }

    fn update_name(dto: &UpdateAreaDto) -> Option<&str> {
        Some(&dto.area_name)
    }

    fn duplicate_message() -> String {
        "An area with this name already exists".to_string()
    }
}
