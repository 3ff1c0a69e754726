//! Client library for the mining business administration backend.
//!
//! - [`core`]: configuration, errors and the authenticated HTTP client
//! - [`features`]: one module per resource plus the generic CRUD controller
//! - [`modules`]: quotation PDF generation
//! - [`cli`]: the `iup-admin` command line on top of the above

pub mod cli;
pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
