//! Location tracking viewer: recorded GPS fixes for a user and day, and a
//! route summary over them.
//!
//! ## Endpoints (tracking backend)
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `tracking/get` | Location points filtered by `user_id` / `date` |

pub mod model;
pub mod service;

pub use model::{haversine_distance, LocationPoint, RouteSummary, TrackingQuery};
pub use service::TrackingService;
