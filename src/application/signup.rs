// SPDX-License-Identifier: MPL-2.0
//! Invitation redemption.

use crate::application::port::{AuthProvider, InvitationError, InvitationStore};
use crate::domain::catalog::AdminContext;
use crate::error::Result;
use chrono::{DateTime, Utc};

/// Registers `email` as an admin with the invitation `code`.
///
/// The code must belong to an active invitation that is either unbound or
/// bound to `email`. The account is created before the invitation is marked
/// used; a failed registration leaves the invitation redeemable.
///
/// # Errors
///
/// Returns the invitation error when the code cannot be redeemed, or the auth
/// error when the account cannot be created.
pub fn redeem_invitation(
    invitations: &dyn InvitationStore,
    auth: &dyn AuthProvider,
    code: &str,
    email: &str,
    now: DateTime<Utc>,
) -> Result<AdminContext> {
    let invitation = invitations.find_by_code(code)?;
    invitation
        .check_redeemable(email, now)
        .map_err(InvitationError::from)?;

    let context = auth.register_admin(email)?;
    invitations.mark_used(&invitation.code, context.email(), now)?;
    log::info!("{} joined with invitation {}", context.email(), invitation.code);
    Ok(context)
}
