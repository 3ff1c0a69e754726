//! Products offered in quotations, each optionally tied to a brand.

pub mod dto;
pub mod model;

pub use dto::{CreateProductDto, UpdateProductDto};
pub use model::{Product, ProductResource, ProductSpecification};

use crate::features::crud::{CrudController, CrudService};

pub type ProductService = CrudService<ProductResource>;
pub type ProductController = CrudController<ProductResource>;
