use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::crud::Resource;
use crate::features::territory::models::RecordStatus;
use crate::shared::validation::{not_blank, territory_code};

/// IUP zone within an area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IupZone {
    pub iup_zone_id: String,
    pub iup_zone_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iup_zone_code: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
    pub area_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateIupZoneDto {
    #[validate(custom(function = "not_blank"))]
    pub iup_zone_name: String,
    #[validate(custom(function = "territory_code"))]
    pub iup_zone_code: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub area_id: String,
    #[serde(default)]
    pub status: RecordStatus,
}

pub type UpdateIupZoneDto = CreateIupZoneDto;

pub struct IupZoneResource;

impl Resource for IupZoneResource {
    type Item = IupZone;
    type Create = CreateIupZoneDto;
    type Update = UpdateIupZoneDto;

    const ENDPOINT: &'static str = "iup-zone";
    const LABEL: &'static str = "IUP zone";

    fn id(item: &IupZone) -> &str {
        &item.iup_zone_id
    }

    fn name(item: &IupZone) -> Option<&str> {
        Some(&item.iup_zone_name)
    }

    fn create_name(dto: &CreateIupZoneDto) -> Option<&str> {
        Some(&dto.iup_zone_name)
    }

    fn update_name(dto: &UpdateIupZoneDto) -> Option<&str> {
        Some(&dto.iup_zone_name)
    }

    fn duplicate_message() -> String {
        "An IUP zone with this name already exists".to_string()
    }
}
