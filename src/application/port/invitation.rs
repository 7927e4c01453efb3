// SPDX-License-Identifier: MPL-2.0
//! Invitation persistence port.

use crate::domain::catalog::{Invitation, RedeemError};
use crate::domain::ids::InvitationId;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvitationError {
    #[error("invalid invitation code")]
    UnknownCode,

    #[error("invitation expired")]
    Expired,

    #[error("invitation already used")]
    AlreadyUsed,

    #[error("invitation is bound to another email")]
    EmailMismatch,

    #[error("invitation store unavailable: {0}")]
    Unavailable(String),
}

impl InvitationError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            InvitationError::UnknownCode => "error-invitation-unknown",
            InvitationError::Expired => "error-invitation-expired",
            InvitationError::AlreadyUsed => "error-invitation-used",
            InvitationError::EmailMismatch => "error-invitation-email-mismatch",
            InvitationError::Unavailable(_) => "error-invitation-unavailable",
        }
    }
}

impl From<RedeemError> for InvitationError {
    fn from(err: RedeemError) -> Self {
        match err {
            RedeemError::Expired => InvitationError::Expired,
            RedeemError::AlreadyUsed => InvitationError::AlreadyUsed,
            RedeemError::EmailMismatch => InvitationError::EmailMismatch,
        }
    }
}

pub trait InvitationStore: Send + Sync {
    /// Lists invitations, newest first.
    fn list(&self) -> Result<Vec<Invitation>, InvitationError>;

    fn create(&self, invitation: Invitation) -> Result<Invitation, InvitationError>;

    fn delete(&self, id: InvitationId) -> Result<(), InvitationError>;

    /// Looks up an invitation by its (normalized) code.
    fn find_by_code(&self, code: &str) -> Result<Invitation, InvitationError>;

    /// Redeems the invitation with `code` for `email`.
    ///
    /// # Errors
    ///
    /// Fails with [`InvitationError::UnknownCode`], [`InvitationError::Expired`],
    /// [`InvitationError::AlreadyUsed`] or [`InvitationError::EmailMismatch`]
    /// without modifying the store.
    fn mark_used(
        &self,
        code: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Invitation, InvitationError>;
}
