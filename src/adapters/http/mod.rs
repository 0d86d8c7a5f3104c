//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with `dto`, `handlers` and `routes`;
//! `router` assembles them under `/api` with the shared middleware stack.

pub mod contact;
pub mod conversation;
pub mod error;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use middleware::OperatorToken;
pub use router::{api_router, app_router};
pub use state::AppState;
