use serde::{Deserialize, Serialize};

use crate::features::crud::Resource;
use crate::features::islands::dto::{CreateIslandDto, UpdateIslandDto};

/// Island row as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Island {
    pub island_id: String,
    pub island_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_name: Option<String>,
}

pub struct IslandResource;

impl Resource for IslandResource {
    type Item = Island;
    type Create = CreateIslandDto;
    type Update = UpdateIslandDto;

    const ENDPOINT: &'static str = "island";
    const LABEL: &'static str = "island";

    fn id(item: &Island) -> &str {
        &item.island_id
    }

    fn name(item: &Island) -> Option<&str> {
        Some(&item.island_name)
    }

    fn create_name(dto: &CreateIslandDto) -> Option<&str> {
        Some(&dto.island_name)
    }

    fn update_name(dto: &UpdateIslandDto) -> Option<&str> {
        Some(&dto.island_name)
    }
}
