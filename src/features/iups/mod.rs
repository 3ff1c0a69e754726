//! IUP (Izin Usaha Pertambangan) mining permit records, the leaves of the
//! territory hierarchy.

pub mod dto;
pub mod model;

pub use dto::{CreateIupDto, UpdateIupDto};
pub use model::{Iup, IupResource};

use crate::features::crud::{CrudController, CrudService};

pub type IupService = CrudService<IupResource>;
pub type IupController = CrudController<IupResource>;
