use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::crud::Resource;
use crate::features::territory::models::RecordStatus;
use crate::shared::validation::{not_blank, territory_code};

/// IUP segmentation within a zone; IUP records hang below it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IupSegmentation {
    pub iup_segmentation_id: String,
    pub iup_segmentation_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iup_segmentation_code: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
    pub iup_zone_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iup_zone_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateIupSegmentationDto {
    #[validate(custom(function = "not_blank"))]
    pub iup_segmentation_name: String,
    #[validate(custom(function = "territory_code"))]
    pub iup_segmentation_code: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub iup_zone_id: String,
    #[serde(default)]
    pub status: RecordStatus,
}

pub type UpdateIupSegmentationDto = CreateIupSegmentationDto;

pub struct IupSegmentationResource;

impl Resource for IupSegmentationResource {
    type Item = IupSegmentation;
    type Create = CreateIupSegmentationDto;
    type Update = UpdateIupSegmentationDto;

    const ENDPOINT: &'static str = "iup-segmentation";
    const LABEL: &'static str = "IUP segmentation";

    fn id(item: &IupSegmentation) -> &str {
        &item.iup_segmentation_id
    }

    fn name(item: &IupSegmentation) -> Option<&str> {
        Some(&item.iup_segmentation_name)
    }

    fn create_name(dto: &CreateIupSegmentationDto) -> Option<&str> {
        Some(&dto.iup_segmentation_name)
    }

    fn update_name(dto: &UpdateIupSegmentationDto) -> Option<&str> {
        Some(&dto.iup_segmentation_name)
    }

    fn duplicate_message() -> String {
        "An IUP segmentation with this name already exists".to_string()
    }
}
