use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::crud::Resource;
use crate::features::territory::models::RecordStatus;
use crate::shared::validation::{not_blank, territory_code};

/// Group, second level of the territory hierarchy (children of an island)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub group_id: String,
    pub group_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_code: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
    pub island_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub island_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroupDto {
    #[validate(custom(function = "not_blank"))]
    pub group_name: String,
    #[validate(custom(function = "territory_code"))]
    pub group_code: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub island_id: String,
    #[serde(default)]
    pub status: RecordStatus,
}

pub type UpdateGroupDto = CreateGroupDto;

pub struct GroupResource;

impl Resource for GroupResource {
    type Item = Group;
    type Create = CreateGroupDto;
    type Update = UpdateGroupDto;

    const ENDPOINT: &'static str = "group";
    const LABEL: &'static str = "group";

    fn id(item: &Group) -> &str {
        &item.group_id
    }

    fn name(item: &Group) -> Option<&str> {
        Some(&item.group_name)
    }

    fn create_name(dto: &CreateGroupDto) -> Option<&str> {
        Some(&dto.group_name)
    }

    fn update_name(dto: &UpdateGroupDto) -> Option<&str> {
        Some(&dto.group_name)
    }
}
