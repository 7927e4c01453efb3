// SPDX-License-Identifier: MPL-2.0
//! File-backed adapters exercised through their ports.

use boutique_showcase::app::services::blocking;
use boutique_showcase::application::port::{
    AuthProvider, CatalogStore, InvitationError, InvitationStore, ObjectStorage, VisitTracker,
};
use boutique_showcase::application::signup::redeem_invitation;
use boutique_showcase::application::upload::PendingUpload;
use boutique_showcase::domain::catalog::{
    Category, CollectionDraft, CollectionStatus, Invitation, InvitationStatus,
};
use boutique_showcase::domain::analytics::{week_start, Visit};
use boutique_showcase::domain::media::MediaKind;
use boutique_showcase::error::Error;
use boutique_showcase::infrastructure::{
    FsObjectStorage, LocalAuth, TomlCatalogStore, TomlInvitationStore, TomlVisitLog,
};
use chrono::{Duration, Utc};
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn draft(name: &str) -> CollectionDraft {
    CollectionDraft {
        name: name.to_string(),
        price: 12_500,
        description: "Hand embroidered georgette".to_string(),
        images: vec!["file:///a.jpg".to_string()],
        videos: Vec::new(),
        status: CollectionStatus::Available,
        category: Some(Category::Festive),
    }
}

#[test]
fn catalog_lists_newest_first_and_survives_reopen() {
    let dir = tempdir().expect("tempdir");
    let store = TomlCatalogStore::in_dir(dir.path());

    let first = store
        .create(draft("First").validate().expect("valid"))
        .expect("create first");
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = store
        .create(draft("Second").validate().expect("valid"))
        .expect("create second");

    let reopened = TomlCatalogStore::in_dir(dir.path());
    let names: Vec<String> = reopened
        .list()
        .expect("list")
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Second", "First"]);

    let sold = reopened
        .set_status(first.id, CollectionStatus::SoldOut)
        .expect("status");
    assert!(sold.status.is_sold_out());

    reopened.delete(second.id).expect("delete");
    let remaining = reopened.list().expect("list");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, first.id);
}

#[test]
fn updating_a_missing_collection_fails() {
    let dir = tempdir().expect("tempdir");
    let store = TomlCatalogStore::in_dir(dir.path());
    let ghost = store
        .create(draft("Ghost").validate().expect("valid"))
        .expect("create");
    store.delete(ghost.id).expect("delete");

    let err = store
        .update(ghost.id, draft("Ghost").validate().expect("valid"))
        .expect_err("missing");
    assert_eq!(err.i18n_key(), "error-catalog-not-found");
}

#[tokio::test]
async fn upload_runs_on_the_blocking_pool() {
    let dir = tempdir().expect("tempdir");
    let storage: Arc<dyn ObjectStorage> = Arc::new(FsObjectStorage::new(dir.path()));
    let upload = PendingUpload::new(Path::new("Look Book.PNG"), vec![1, 2, 3], 1_700_000_000_000);
    assert_eq!(upload.kind, MediaKind::Image);
    assert!(upload.object_name.starts_with("1700000000000-"));
    assert!(upload.object_name.ends_with(".png"));

    let name = upload.object_name.clone();
    let url = blocking(move || {
        Ok(storage.upload(&upload.bytes, &upload.object_name, upload.content_type)?)
    })
    .await
    .expect("upload");

    assert!(url.starts_with("file://"));
    assert_eq!(std::fs::read(dir.path().join(name)).expect("read back"), [1, 2, 3]);
}

#[tokio::test]
async fn empty_upload_is_refused() {
    let dir = tempdir().expect("tempdir");
    let storage = FsObjectStorage::new(dir.path());
    let result = blocking(move || Ok(storage.upload(&[], "x.jpg", "image/jpeg")?)).await;
    assert!(matches!(result, Err(Error::Storage(_))));
}

#[test]
fn redeeming_an_invitation_creates_an_admin() {
    let dir = tempdir().expect("tempdir");
    let invitations = TomlInvitationStore::in_dir(dir.path());
    let auth = LocalAuth::in_dir(dir.path());
    let now = Utc::now();

    let invitation = invitations
        .create(Invitation::issue(None, 7, now))
        .expect("create");
    let code = invitation.code.to_lowercase();

    let context = redeem_invitation(&invitations, &auth, &code, "tailor@example.com", now)
        .expect("redeem");
    assert!(context.is_admin());
    assert_eq!(
        auth.resolve_admin("tailor@example.com").expect("resolve").email(),
        "tailor@example.com"
    );

    let stored = invitations.find_by_code(&invitation.code).expect("find");
    assert_eq!(stored.status(now), InvitationStatus::Used);
    assert_eq!(stored.used_by.as_deref(), Some("tailor@example.com"));

    let again = redeem_invitation(&invitations, &auth, &invitation.code, "other@example.com", now);
    assert!(matches!(
        again,
        Err(Error::Invitation(InvitationError::AlreadyUsed))
    ));
}

#[test]
fn expired_or_bound_invitations_are_refused() {
    let dir = tempdir().expect("tempdir");
    let invitations = TomlInvitationStore::in_dir(dir.path());
    let auth = LocalAuth::in_dir(dir.path());
    let now = Utc::now();

    let expired = invitations
        .create(Invitation::issue(None, 1, now - Duration::days(2)))
        .expect("create");
    let result = redeem_invitation(&invitations, &auth, &expired.code, "late@example.com", now);
    assert!(matches!(result, Err(Error::Invitation(InvitationError::Expired))));

    let bound = invitations
        .create(Invitation::issue(Some("owner@example.com"), 7, now))
        .expect("create");
    let result = redeem_invitation(&invitations, &auth, &bound.code, "else@example.com", now);
    assert!(matches!(
        result,
        Err(Error::Invitation(InvitationError::EmailMismatch))
    ));
    assert!(auth.resolve_admin("else@example.com").is_err());

    let unknown = redeem_invitation(&invitations, &auth, "NOPE1234", "x@example.com", now);
    assert!(matches!(
        unknown,
        Err(Error::Invitation(InvitationError::UnknownCode))
    ));
}

#[test]
fn bootstrap_only_registers_on_an_empty_registry() {
    let dir = tempdir().expect("tempdir");
    let auth = LocalAuth::in_dir(dir.path());
    assert!(auth.bootstrap("first@example.com").expect("bootstrap"));
    assert!(!auth.bootstrap("second@example.com").expect("bootstrap"));
    assert!(auth.resolve_admin("second@example.com").is_err());
}

#[tokio::test]
async fn visit_log_counts_this_week_across_sessions() {
    let dir = tempdir().expect("tempdir");
    let log: Arc<dyn VisitTracker> = Arc::new(TomlVisitLog::in_dir(dir.path()));
    let now = Utc::now();
    let monday = week_start(now);

    let visits = [
        Visit::new("/", "last-week", "Firefox", monday - Duration::hours(1)),
        Visit::new("/", "a", "Firefox", monday + Duration::minutes(1)),
        Visit::new("/collections/x", "a", "Firefox", monday + Duration::minutes(2)),
        Visit::new("/", "b", "Chrome", monday + Duration::minutes(3)),
    ];
    for visit in visits {
        let log = Arc::clone(&log);
        blocking(move || Ok(log.record(visit)?))
            .await
            .expect("record");
    }

    let reopened = TomlVisitLog::in_dir(dir.path());
    let stats = reopened.stats(now).expect("stats");
    assert_eq!(stats.weekly_visits, 3);
    assert_eq!(stats.weekly_unique, 2);
    assert_eq!(stats.recent.len(), 4);
    assert_eq!(stats.recent[0].session_id, "b");
    assert_eq!(stats.recent[3].session_id, "last-week");
}
