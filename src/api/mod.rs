//! HTTP surface of the board.
//!
//! The router exposes the `columns` and `tasks` resources under `/api`, an
//! index of them at `/api` itself, and `/auth/user`. Handlers translate JSON payloads through
//! [`crate::board::transfer`], talk to storage through the repository ports
//! held in [`AppState`], and report every failure as an [`ApiErrorResponse`].
//! Authentication is delegated to the [`IdentityProvider`](crate::identity::IdentityProvider)
//! by middleware that runs ahead of every route.

pub mod auth;
pub mod columns;
pub mod error;
pub mod extract;
pub mod root;
pub mod router;
pub mod state;
pub mod tasks;
pub mod user;

pub use error::{ApiError, ApiErrorResponse};
pub use router::create_router;
pub use state::AppState;
