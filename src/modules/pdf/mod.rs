//! Client-side quotation PDF generation.
//!
//! Rich text is parsed into [`RenderInstruction`]s up front; the renderer
//! only deals with cursors and page breaks. Pages are addressed by index so
//! two columns can be laid out independently and meet again afterwards.

pub mod document;
pub mod layout;
pub mod quotation;
pub mod rich_text;

pub use document::PdfDocument;
pub use layout::{resume_at_max, Cursor, FontStyle, PageGeometry};
pub use quotation::{quotation_file_name, save_quotation_pdf, CompanyProfile, QuotationRenderer};
pub use rich_text::RenderInstruction;
