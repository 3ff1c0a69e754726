use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::crud::Resource;
use crate::shared::validation::not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermCondition {
    pub term_condition_id: String,
    pub term_condition_name: String,
    /// HTML produced by the rich-text editor
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTermConditionDto {
    #[validate(custom(function = "not_blank"))]
    pub term_condition_name: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    #[serde(default)]
    pub is_default: bool,
}

pub type UpdateTermConditionDto = CreateTermConditionDto;

pub struct TermConditionResource;

impl Resource for TermConditionResource {
    type Item = TermCondition;
    type Create = CreateTermConditionDto;
    type Update = UpdateTermConditionDto;

    const ENDPOINT: &'static str = "term-condition";
    const LABEL: &'static str = "term condition";

    fn id(item: &TermCondition) -> &str {
        &item.term_condition_id
    }

    fn name(item: &TermCondition) -> Option<&str> {
        Some(&item.term_condition_name)
    }

    fn create_name(dto: &CreateTermConditionDto) -> Option<&str> {
        Some(&dto.term_condition_name)
    }

    fn update_name(dto: &UpdateTermConditionDto) -> Option<&str> {
        Some(&dto.term_condition_name)
    }
}
