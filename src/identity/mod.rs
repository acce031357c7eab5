//! Authentication collaborator.
//!
//! Credential issuance, registration, and password reset belong to an
//! external identity service. The board only asks an [`IdentityProvider`]
//! for a verdict on the credentials a request carries.

mod provider;
mod static_tokens;

pub use provider::{AuthenticationError, Credentials, Identity, IdentityProvider};
pub use static_tokens::{ParseTokenTableError, StaticTokenIdentityProvider};
