//! Port through which callers are authenticated.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Proof of identity presented with a request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Token from an `Authorization: Bearer` or `Authorization: Token` header.
    Token(String),
    /// Value of the session cookie.
    Session(String),
}

impl Credentials {
    /// Returns the raw secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        match self {
            Self::Token(secret) | Self::Session(secret) => secret,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Credentials::Token(<redacted>)"),
            Self::Session(_) => f.write_str("Credentials::Session(<redacted>)"),
        }
    }
}

/// Authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Username reported by the identity service.
    pub username: String,
}

impl Identity {
    /// Creates an identity for the given username.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Verdicts other than acceptance.
#[derive(Debug, Clone, Error)]
pub enum AuthenticationError {
    /// The request carried no credentials.
    #[error("authentication credentials were not provided")]
    MissingCredentials,

    /// The identity service rejected the credentials.
    #[error("invalid authentication credentials")]
    InvalidCredentials,

    /// The caller is known but may not use the board.
    #[error("user '{0}' does not have permission to perform this action")]
    Denied(String),

    /// The identity service could not be reached.
    #[error("identity service unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthenticationError {
    /// Wraps an identity-service failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}

/// External identity subsystem.
///
/// The board trusts the verdict unconditionally; it never issues or
/// inspects credentials itself.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves credentials to an identity.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::InvalidCredentials`] for unknown
    /// credentials, [`AuthenticationError::Denied`] for known callers without
    /// access, and [`AuthenticationError::Unavailable`] when the service
    /// fails.
    async fn authenticate(&self, credentials: &Credentials)
    -> Result<Identity, AuthenticationError>;
}
