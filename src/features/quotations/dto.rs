use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::features::quotations::model::{QuotationAccessory, QuotationSpecification};
use crate::shared::validation::{not_blank, quotation_no};

fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(
            ValidationError::new("positive").with_message("Must be greater than zero".into())
        );
    }
    Ok(())
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("non_negative").with_message("Cannot be negative".into()));
    }
    Ok(())
}

fn percentage(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || *value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::new("percentage")
            .with_message("Percentage must be between 0 and 100".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuotationItemDto {
    pub product_id: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub product_name: String,
    #[validate(custom(function = "positive"))]
    pub quantity: Decimal,
    pub unit: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
    #[serde(default)]
    pub specifications: Vec<QuotationSpecification>,
    #[serde(default)]
    pub accessories: Vec<QuotationAccessory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuotationDto {
    #[validate(custom(function = "quotation_no"))]
    pub quotation_no: String,
    pub quotation_date: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub customer_name: String,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
    pub attention: Option<String>,
    pub subject: Option<String>,
    #[validate(custom(function = "percentage"))]
    pub ppn_percentage: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub delivery_fee: Option<Decimal>,
    #[validate(custom(function = "percentage"))]
    pub payment_percentage: Option<Decimal>,
    pub term_condition_id: Option<String>,
    #[validate(length(min = 1, message = "At least one item is required"), nested)]
    pub items: Vec<QuotationItemDto>,
}

pub type UpdateQuotationDto = CreateQuotationDto;

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> QuotationItemDto {
        QuotationItemDto {
            product_id: Some("p-1".to_string()),
            product_name: "Excavator PC200".to_string(),
            quantity: Decimal::new(2, 0),
            unit: Some("unit".to_string()),
            price: Decimal::new(1_500_000_000, 0),
            specifications: Vec::new(),
            accessories: Vec::new(),
        }
    }

    fn dto() -> CreateQuotationDto {
        CreateQuotationDto {
            quotation_no: "QT/2024/001".to_string(),
            quotation_date: Some("2024-05-01".to_string()),
            customer_name: "PT Bara Kalimantan".to_string(),
            customer_address: None,
            customer_phone: None,
            attention: None,
            subject: None,
            ppn_percentage: Some(Decimal::new(11, 0)),
            delivery_fee: None,
            payment_percentage: Some(Decimal::new(30, 0)),
            term_condition_id: None,
            items: vec![item()],
        }
    }

    #[test]
    fn test_valid_quotation_passes() {
        assert!(dto().validate().is_ok());
    }

    #[test]
    fn test_quotation_requires_items() {
        let mut dto = dto();
        dto.items.clear();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn test_percentage_out_of_range_rejected() {
        let mut dto = dto();
        dto.ppn_percentage = Some(Decimal::new(101, 0));
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("ppn_percentage"));
    }

    #[test]
    fn test_nested_item_is_validated() {
        let mut dto = dto();
        dto.items[0].quantity = Decimal::ZERO;
        assert!(dto.validate().is_err());
    }
}
