//! Modules layer - output adapters that sit outside the REST features
//!
//! Currently the PDF writer used for printable quotations.

pub mod pdf;
