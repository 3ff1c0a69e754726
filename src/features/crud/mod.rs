//! Generic CRUD plumbing shared by every list screen.
//!
//! A resource describes its endpoint and types once via [`Resource`];
//! [`CrudService`] maps the verbs onto REST calls and [`CrudController`]
//! holds list, pagination and filter state on top of any [`ResourceApi`].
//!
//! ## Endpoints
//!
//! | Verb | Endpoint | Body |
//! |------|----------|------|
//! | list | `POST <resource>/get` | `{page, limit, sort_order, search, ...filters}` |
//! | detail | `GET <resource>/{id}` | - |
//! | create | `POST <resource>/create` | create DTO |
//! | update | `PUT <resource>/{id}` | update DTO |
//! | delete | `DELETE <resource>/{id}` | - |

pub mod controller;
pub mod resource;
pub mod service;

pub use controller::{CrudController, ListFilters, ListState};
pub use resource::Resource;
pub use service::{CrudService, ResourceApi};
