use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::features::crud::Resource;
use crate::features::iups::dto::{CreateIupDto, UpdateIupDto};
use crate::features::territory::RecordStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iup {
    pub iup_id: String,
    pub iup_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iup_code: Option<String>,
    /// Permit (SK) number issued by the licensing authority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_hectare: Option<Decimal>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iup_segmentation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iup_segmentation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_name: Option<String>,
}

pub struct IupResource;

impl Resource for IupResource {
    type Item = Iup;
    type Create = CreateIupDto;
    type Update = UpdateIupDto;

    const ENDPOINT: &'static str = "iup";
    const LABEL: &'static str = "IUP";

    fn id(item: &Iup) -> &str {
        &item.iup_id
    }

    fn name(item: &Iup) -> Option<&str> {
        Some(&item.iup_name)
    }

    fn create_name(dto: &CreateIupDto) -> Option<&str> {
        Some(&dto.iup_name)
    }

    fn update_name(dto: &UpdateIupDto) -> Option<&str> {
        Some(&dto.iup_name)
    }

    fn duplicate_message() -> String {
        "An IUP with this name already exists".to_string()
    }
}
