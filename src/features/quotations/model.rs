use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::features::crud::Resource;
use crate::features::quotations::dto::{CreateQuotationDto, UpdateQuotationDto};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationSpecification {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationAccessory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    pub quantity: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub price: Decimal,
    /// Server-computed line total, shown as-is when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub specifications: Vec<QuotationSpecification>,
    #[serde(default)]
    pub accessories: Vec<QuotationAccessory>,
}

impl QuotationItem {
    /// Line total: the server value when present, otherwise `price × quantity`
    pub fn line_total(&self) -> Decimal {
        self.total.unwrap_or(self.price * self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub quotation_id: String,
    pub quotation_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attention: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppn_percentage: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_percentage: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_nominal: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_condition_id: Option<String>,
    /// HTML terms copied onto the quotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_name: Option<String>,
    #[serde(default)]
    pub items: Vec<QuotationItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_name: Option<String>,
}

pub struct QuotationResource;

impl Resource for QuotationResource {
    type Item = Quotation;
    type Create = CreateQuotationDto;
    type Update = UpdateQuotationDto;

    const ENDPOINT: &'static str = "quotation";
    const LABEL: &'static str = "quotation";

    fn id(item: &Quotation) -> &str {
        &item.quotation_id
    }

    fn name(item: &Quotation) -> Option<&str> {
        Some(&item.quotation_no)
    }

    fn create_name(dto: &CreateQuotationDto) -> Option<&str> {
        Some(&dto.quotation_no)
    }

    fn update_name(dto: &UpdateQuotationDto) -> Option<&str> {
        Some(&dto.quotation_no)
    }

    fn duplicate_message() -> String {
        "A quotation with this number already exists".to_string()
    }
}
