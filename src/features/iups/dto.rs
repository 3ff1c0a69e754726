use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::features::territory::RecordStatus;
use crate::shared::validation::{not_blank, territory_code};

fn positive_area(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || value.is_zero() {
        return Err(ValidationError::new("area_hectare")
            .with_message("Area must be greater than zero".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateIupDto {
    #[validate(
        custom(function = "not_blank"),
        length(max = 150, message = "IUP name must not exceed 150 characters")
    )]
    pub iup_name: String,
    #[validate(custom(function = "territory_code"))]
    pub iup_code: Option<String>,
    pub license_number: Option<String>,
    /// Permit expiry date (YYYY-MM-DD)
    pub valid_until: Option<String>,
    #[validate(custom(function = "positive_area"))]
    pub area_hectare: Option<Decimal>,
    #[validate(custom(function = "not_blank"))]
    pub iup_segmentation_id: String,
    #[serde(default)]
    pub status: RecordStatus,
}

pub type UpdateIupDto = CreateIupDto;
