// SPDX-License-Identifier: MPL-2.0
//! Explicit admin session context.
//!
//! The admin surface receives an [`AdminContext`] when it is built. It never
//! looks up session or role state on its own.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Viewer,
}

/// Resolved identity of the operator using the admin tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    email: String,
    role: Role,
}

impl AdminContext {
    #[must_use]
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
