//! Authentication: login/logout against the backend and the injected
//! [`AuthContext`] that every API call reads its bearer token from.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `auth/login` | Exchange email/password for a token |

pub mod context;
pub mod dto;
pub mod service;
pub mod token_store;

pub use context::AuthContext;
pub use dto::{LoggedInUser, LoginRequestDto};
pub use service::AuthService;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
