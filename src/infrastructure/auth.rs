// SPDX-License-Identifier: MPL-2.0
//! Local admin registry.
//!
//! Accounts live in `admins.toml` inside the data directory. There are no
//! passwords: the desktop session owner names the account with `--admin`.
//! The very first account is created by [`LocalAuth::bootstrap`] when the
//! registry is empty; every later account comes from an invitation.

use super::toml_file::{self, DocumentError};
use crate::application::port::auth::{AuthError, AuthProvider};
use crate::domain::catalog::{AdminContext, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub const ADMINS_FILE: &str = "admins.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Account {
    email: String,
    role: Role,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AccountDocument {
    #[serde(default, rename = "account")]
    accounts: Vec<Account>,
}

impl From<DocumentError> for AuthError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Io(msg) | DocumentError::Parse(msg) => AuthError::Unavailable(msg),
        }
    }
}

#[derive(Debug)]
pub struct LocalAuth {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalAuth {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(ADMINS_FILE))
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Registers `email` as the first admin if no account exists yet.
    ///
    /// Returns `true` when an account was created.
    pub fn bootstrap(&self, email: &str) -> Result<bool, AuthError> {
        let empty = {
            let _guard = self.guard();
            let document: AccountDocument = toml_file::read(&self.path)?;
            document.accounts.is_empty()
        };
        if !empty {
            return Ok(false);
        }
        self.register_admin(email)?;
        log::info!("bootstrapped first admin account {email}");
        Ok(true)
    }
}

fn normalize_email(raw: &str) -> Result<String, AuthError> {
    let email = raw.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'))
        && !email.chars().any(char::is_whitespace);
    if valid {
        Ok(email)
    } else {
        Err(AuthError::InvalidEmail(raw.trim().to_string()))
    }
}

impl AuthProvider for LocalAuth {
    fn resolve_admin(&self, email: &str) -> Result<AdminContext, AuthError> {
        let email = normalize_email(email)?;
        let _guard = self.guard();
        let document: AccountDocument = toml_file::read(&self.path)?;
        match document.accounts.iter().find(|a| a.email == email) {
            Some(account) if account.role == Role::Admin => {
                Ok(AdminContext::new(account.email.clone(), Role::Admin))
            }
            _ => Err(AuthError::NotAdmin(email)),
        }
    }

    fn register_admin(&self, email: &str) -> Result<AdminContext, AuthError> {
        let email = normalize_email(email)?;
        let _guard = self.guard();
        let mut document: AccountDocument = toml_file::read(&self.path)?;
        if document.accounts.iter().any(|a| a.email == email) {
            return Err(AuthError::AlreadyRegistered(email));
        }
        document.accounts.push(Account {
            email: email.clone(),
            role: Role::Admin,
            created_at: Utc::now(),
        });
        toml_file::write(&self.path, &document)?;
        log::info!("registered admin account {email}");
        Ok(AdminContext::new(email, Role::Admin))
    }
}
