//! Quotations: header, line items with nested specifications and
//! accessories, and the printable PDF.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `quotation/get` | Paginated quotation list |
//! | GET | `quotation/{id}` | Quotation with items |
//! | POST | `quotation/create` | Create quotation |
//! | PUT | `quotation/{id}` | Update quotation |
//! | DELETE | `quotation/{id}` | Delete quotation |

pub mod dto;
pub mod model;
pub mod service;
pub mod summary;

pub use dto::{CreateQuotationDto, QuotationItemDto, UpdateQuotationDto};
pub use model::{
    Quotation, QuotationAccessory, QuotationItem, QuotationResource, QuotationSpecification,
};
pub use service::{QuotationController, QuotationPrinter, QuotationService};
pub use summary::{format_rupiah, FinancialSummary};
