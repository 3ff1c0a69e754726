//! Territory hierarchy: Island → Group → Area → IUP Zone → IUP Segmentation → IUP.
//!
//! Each level below the island is a CRUD resource of its own. The viewer
//! loads the whole nested tree once and flattens it into display rows; the
//! tree is never patched in place, every mutation goes through a refetch.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `territory/get` | Nested tree, optionally scoped to one island |
//! | POST | `group/get`, `area/get`, `iup-zone/get`, `iup-segmentation/get` | Level lists |
//! | POST/PUT/DELETE | `<level>/create`, `<level>/{id}` | Level mutations |

pub mod models;
pub mod service;
pub mod tree;

pub use models::RecordStatus;
pub use service::{TerritoryService, TerritoryTreeQuery};
pub use tree::{ExpandedSet, NodeKey, NodeType, TerritoryNode, TreeRow};
