//! Island master data, the root level of the territory hierarchy.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `island/get` | Paginated island list |
//! | GET | `island/{id}` | Island detail |
//! | POST | `island/create` | Create island |
//! | PUT | `island/{id}` | Update island |
//! | DELETE | `island/{id}` | Delete island |

pub mod dto;
pub mod model;
pub mod service;

pub use dto::{CreateIslandDto, UpdateIslandDto};
pub use model::{Island, IslandResource};
pub use service::{IslandController, IslandService};
