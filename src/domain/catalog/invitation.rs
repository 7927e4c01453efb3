// SPDX-License-Identifier: MPL-2.0
//! Admin invitations.
//!
//! An invitation is a short uppercase code that lets one person register as
//! an admin before it expires. It can optionally be bound to an email.

use crate::domain::ids::InvitationId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const CODE_LEN: usize = 8;

/// Lifecycle status derived from timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationStatus {
    Active,
    Expired,
    Used,
}

impl InvitationStatus {
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            InvitationStatus::Active => "invitation-status-active",
            InvitationStatus::Expired => "invitation-status-expired",
            InvitationStatus::Used => "invitation-status-used",
        }
    }
}

/// Why a code cannot be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemError {
    Expired,
    AlreadyUsed,
    EmailMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: InvitationId,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Issues a fresh invitation valid for `validity_days`.
    #[must_use]
    pub fn issue(email: Option<&str>, validity_days: u32, now: DateTime<Utc>) -> Self {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        Self {
            id: InvitationId::new(),
            code: generate_code(),
            email,
            expires_at: now + Duration::days(i64::from(validity_days)),
            used_at: None,
            used_by: None,
            created_at: now,
        }
    }

    #[must_use]
    pub fn status(&self, now: DateTime<Utc>) -> InvitationStatus {
        if self.used_at.is_some() {
            InvitationStatus::Used
        } else if self.expires_at <= now {
            InvitationStatus::Expired
        } else {
            InvitationStatus::Active
        }
    }

    /// Checks the invitation can be redeemed by `email`.
    pub fn check_redeemable(&self, email: &str, now: DateTime<Utc>) -> Result<(), RedeemError> {
        match self.status(now) {
            InvitationStatus::Used => return Err(RedeemError::AlreadyUsed),
            InvitationStatus::Expired => return Err(RedeemError::Expired),
            InvitationStatus::Active => {}
        }
        if let Some(bound) = &self.email {
            if !bound.eq_ignore_ascii_case(email.trim()) {
                return Err(RedeemError::EmailMismatch);
            }
        }
        Ok(())
    }

    /// Marks the invitation as consumed.
    pub fn redeem(&mut self, email: &str, now: DateTime<Utc>) -> Result<(), RedeemError> {
        self.check_redeemable(email, now)?;
        self.used_at = Some(now);
        self.used_by = Some(email.trim().to_string());
        Ok(())
    }

    /// Signup link handed out to the invitee.
    #[must_use]
    pub fn signup_link(&self, base_url: &str) -> String {
        format!(
            "{}/admin/invite-signup?code={}",
            base_url.trim_end_matches('/'),
            self.code
        )
    }
}

/// Normalizes user-typed codes the way they are stored.
#[must_use]
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn generate_code() -> String {
    let mut code = uuid::Uuid::new_v4().simple().to_string();
    code.truncate(CODE_LEN);
    code.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn issued_codes_are_uppercase_and_short() {
        let invitation = Invitation::issue(None, 7, now());
        assert_eq!(invitation.code.len(), CODE_LEN);
        assert_eq!(invitation.code, invitation.code.to_uppercase());
        assert_eq!(invitation.expires_at, now() + Duration::days(7));
    }

    #[test]
    fn blank_email_is_not_bound() {
        let invitation = Invitation::issue(Some("  "), 7, now());
        assert!(invitation.email.is_none());
    }

    #[test]
    fn status_transitions() {
        let mut invitation = Invitation::issue(None, 1, now());
        assert_eq!(invitation.status(now()), InvitationStatus::Active);
        assert_eq!(
            invitation.status(now() + Duration::days(1)),
            InvitationStatus::Expired
        );

        invitation.redeem("a@b.c", now()).expect("active invitation");
        assert_eq!(invitation.status(now()), InvitationStatus::Used);
        assert_eq!(invitation.used_by.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn redeem_rejects_used_expired_and_mismatch() {
        let mut invitation = Invitation::issue(Some("Owner@Shop.in"), 2, now());

        assert_eq!(
            invitation.check_redeemable("someone@else.in", now()),
            Err(RedeemError::EmailMismatch)
        );
        assert_eq!(
            invitation.check_redeemable("owner@shop.in", now() + Duration::days(3)),
            Err(RedeemError::Expired)
        );

        invitation.redeem("owner@shop.in", now()).expect("matching email");
        assert_eq!(
            invitation.redeem("owner@shop.in", now()),
            Err(RedeemError::AlreadyUsed)
        );
    }

    #[test]
    fn signup_link_format() {
        let mut invitation = Invitation::issue(None, 7, now());
        invitation.code = "ABCD1234".into();
        assert_eq!(
            invitation.signup_link("https://shop.example/"),
            "https://shop.example/admin/invite-signup?code=ABCD1234"
        );
    }

    #[test]
    fn normalize_code_uppercases() {
        assert_eq!(normalize_code("  abcd12ef "), "ABCD12EF");
    }
}
