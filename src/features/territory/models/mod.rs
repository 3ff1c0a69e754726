use serde::{Deserialize, Serialize};

mod area;
mod group;
mod iup_segmentation;
mod iup_zone;

pub use area::{Area, AreaResource, CreateAreaDto, UpdateAreaDto};
pub use group::{CreateGroupDto, Group, GroupResource, UpdateGroupDto};
pub use iup_segmentation::{
    CreateIupSegmentationDto, IupSegmentation, IupSegmentationResource, UpdateIupSegmentationDto,
};
pub use iup_zone::{CreateIupZoneDto, IupZone, IupZoneResource, UpdateIupZoneDto};

/// Activation status shared by every territory level and IUP records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordStatus::Active => write!(f, "active"),
            RecordStatus::Inactive => write!(f, "inactive"),
            RecordStatus::Unknown => write!(f, "unknown"),
        }
    }
}
