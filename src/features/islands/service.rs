use crate::features::crud::{CrudController, CrudService};
use crate::features::islands::model::IslandResource;

pub type IslandService = CrudService<IslandResource>;
pub type IslandController = CrudController<IslandResource>;
