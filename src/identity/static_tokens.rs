//! Identity provider backed by a fixed token table.

use super::provider::{AuthenticationError, Credentials, Identity, IdentityProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Error returned for a malformed token table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid token entry '{0}', expected username:token")]
pub struct ParseTokenTableError(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
struct TokenEntry {
    username: String,
    denied: bool,
}

/// Identity provider that accepts a configured set of secrets.
///
/// Each secret is accepted both as a bearer token and as a session cookie.
/// Users registered as denied authenticate successfully but are refused
/// access.
#[derive(Clone, Default)]
pub struct StaticTokenIdentityProvider {
    entries: HashMap<String, TokenEntry>,
}

impl fmt::Debug for StaticTokenIdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenIdentityProvider")
            .field("secrets", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl StaticTokenIdentityProvider {
    /// Creates a provider that rejects every credential.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a secret for a user with access.
    #[must_use]
    pub fn with_token(mut self, username: impl Into<String>, secret: impl Into<String>) -> Self {
        self.entries.insert(
            secret.into(),
            TokenEntry {
                username: username.into(),
                denied: false,
            },
        );
        self
    }

    /// Registers a secret for a user without access.
    #[must_use]
    pub fn with_denied_token(
        mut self,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            secret.into(),
            TokenEntry {
                username: username.into(),
                denied: true,
            },
        );
        self
    }

    /// Parses a comma-separated `username:token` table.
    ///
    /// An entry prefixed with `!` registers a denied user. Blank entries are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTokenTableError`] when an entry lacks a username or a
    /// token.
    pub fn parse(table: &str) -> Result<Self, ParseTokenTableError> {
        table
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .try_fold(Self::new(), |provider, entry| {
                let (denied, pair) = entry
                    .strip_prefix('!')
                    .map_or((false, entry), |rest| (true, rest));
                let (username, secret) = pair
                    .split_once(':')
                    .map(|(user, token)| (user.trim(), token.trim()))
                    .filter(|(user, token)| !user.is_empty() && !token.is_empty())
                    .ok_or_else(|| ParseTokenTableError(entry.to_owned()))?;
                Ok(if denied {
                    provider.with_denied_token(username, secret)
                } else {
                    provider.with_token(username, secret)
                })
            })
    }

    /// Returns the number of registered secrets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no secret is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenIdentityProvider {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity, AuthenticationError> {
        let entry = self
            .entries
            .get(credentials.secret())
            .ok_or(AuthenticationError::InvalidCredentials)?;
        if entry.denied {
            return Err(AuthenticationError::Denied(entry.username.clone()));
        }
        Ok(Identity::new(entry.username.clone()))
    }
}
