// SPDX-License-Identifier: MPL-2.0
//! Invitations stored in a TOML document.

use super::toml_file::{self, DocumentError};
use crate::application::port::invitation::{InvitationError, InvitationStore};
use crate::domain::catalog::{normalize_code, Invitation};
use crate::domain::ids::InvitationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub const INVITATIONS_FILE: &str = "invitations.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct InvitationDocument {
    #[serde(default, rename = "invitation")]
    invitations: Vec<Invitation>,
}

impl From<DocumentError> for InvitationError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Io(msg) | DocumentError::Parse(msg) => {
                InvitationError::Unavailable(msg)
            }
        }
    }
}

/// File-backed [`InvitationStore`].
#[derive(Debug)]
pub struct TomlInvitationStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TomlInvitationStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(INVITATIONS_FILE))
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl InvitationStore for TomlInvitationStore {
    fn list(&self) -> Result<Vec<Invitation>, InvitationError> {
        let _guard = self.guard();
        let mut document: InvitationDocument = toml_file::read(&self.path)?;
        document
            .invitations
            .sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(document.invitations)
    }

    fn create(&self, invitation: Invitation) -> Result<Invitation, InvitationError> {
        let _guard = self.guard();
        let mut document: InvitationDocument = toml_file::read(&self.path)?;
        document.invitations.push(invitation.clone());
        toml_file::write(&self.path, &document)?;
        log::info!("created invitation {}", invitation.code);
        Ok(invitation)
    }

    fn delete(&self, id: InvitationId) -> Result<(), InvitationError> {
        let _guard = self.guard();
        let mut document: InvitationDocument = toml_file::read(&self.path)?;
        document.invitations.retain(|i| i.id != id);
        toml_file::write(&self.path, &document)?;
        log::info!("deleted invitation {id}");
        Ok(())
    }

    fn find_by_code(&self, code: &str) -> Result<Invitation, InvitationError> {
        let _guard = self.guard();
        let code = normalize_code(code);
        let document: InvitationDocument = toml_file::read(&self.path)?;
        document
            .invitations
            .into_iter()
            .find(|i| i.code == code)
            .ok_or(InvitationError::UnknownCode)
    }

    fn mark_used(
        &self,
        code: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Invitation, InvitationError> {
        let _guard = self.guard();
        let code = normalize_code(code);
        let mut document: InvitationDocument = toml_file::read(&self.path)?;
        let invitation = document
            .invitations
            .iter_mut()
            .find(|i| i.code == code)
            .ok_or(InvitationError::UnknownCode)?;
        invitation.redeem(email, now)?;
        let used = invitation.clone();
        toml_file::write(&self.path, &document)?;
        log::info!("invitation {code} redeemed by {email}");
        Ok(used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn codes_are_matched_case_insensitively() {
        let dir = tempdir().expect("temp dir");
        let store = TomlInvitationStore::in_dir(dir.path());
        let invitation = store
            .create(Invitation::issue(None, 7, Utc::now()))
            .expect("create");

        let lower = invitation.code.to_lowercase();
        assert_eq!(store.find_by_code(&lower).expect("found").id, invitation.id);
    }

    #[test]
    fn failed_redeem_leaves_store_untouched() {
        let dir = tempdir().expect("temp dir");
        let store = TomlInvitationStore::in_dir(dir.path());
        let invitation = store
            .create(Invitation::issue(Some("owner@shop.in"), 7, Utc::now()))
            .expect("create");

        assert_eq!(
            store.mark_used(&invitation.code, "other@shop.in", Utc::now()),
            Err(InvitationError::EmailMismatch)
        );
        let stored = store.find_by_code(&invitation.code).expect("found");
        assert!(stored.used_at.is_none());
    }

    #[test]
    fn unknown_code() {
        let dir = tempdir().expect("temp dir");
        let store = TomlInvitationStore::in_dir(dir.path());
        assert_eq!(
            store.mark_used("NOPE", "a@b.c", Utc::now()),
            Err(InvitationError::UnknownCode)
        );
    }
}
