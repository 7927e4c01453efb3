// SPDX-License-Identifier: MPL-2.0
//! Admin identity port.
//!
//! The admin surface never queries session state itself. An [`AuthProvider`]
//! resolves an [`AdminContext`] once, before the admin screens are built.

use crate::domain::catalog::AdminContext;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0} is not an administrator")]
    NotAdmin(String),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("account already exists: {0}")]
    AlreadyRegistered(String),

    #[error("auth backend unavailable: {0}")]
    Unavailable(String),
}

impl AuthError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            AuthError::NotAdmin(_) => "error-auth-not-admin",
            AuthError::InvalidEmail(_) => "error-auth-invalid-email",
            AuthError::AlreadyRegistered(_) => "error-auth-already-registered",
            AuthError::Unavailable(_) => "error-auth-unavailable",
        }
    }
}

pub trait AuthProvider: Send + Sync {
    /// Resolves the admin context for `email`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAdmin`] when the account has no admin role.
    fn resolve_admin(&self, email: &str) -> Result<AdminContext, AuthError>;

    /// Registers `email` as an admin account.
    fn register_admin(&self, email: &str) -> Result<AdminContext, AuthError>;
}
