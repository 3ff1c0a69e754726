//! Product brands.
//!
//! Brand names are unique case-insensitively; the check runs against the
//! loaded page before any request is sent.

pub mod dto;
pub mod model;
pub mod service;

pub use dto::{CreateBrandDto, UpdateBrandDto};
pub use model::{Brand, BrandResource};
pub use service::{BrandController, BrandService};
