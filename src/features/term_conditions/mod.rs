//! Term-and-condition templates. `content` is rich text (HTML) that ends up
//! in the terms column of printed quotations.

pub mod model;

pub use model::{
    CreateTermConditionDto, TermCondition, TermConditionResource, UpdateTermConditionDto,
};

use crate::features::crud::{CrudController, CrudService};

pub type TermConditionService = CrudService<TermConditionResource>;
pub type TermConditionController = CrudController<TermConditionResource>;
