//! Reconciliation of submitted threads against pending references.

mod common;

use chrono::{Duration, Utc};

use crate::common::*;
use server_core::common::MemberId;
use server_core::domains::reconciliation::{reconcile_thread, Outcome, ReconciliationConfig};
use server_core::domains::references::ReferenceStatus;
use server_core::domains::threads::activities::create_thread;
use server_core::kernel::{BaseReferenceStore, BaseThreadStore};

#[tokio::test]
async fn recent_matching_reference_is_completed() {
    let h = memory_harness();
    let author = MemberId::new();
    let now = Utc::now();
    let matching = pending_reference(author, Some("Python debugging help"), Duration::minutes(30), now);
    let unrelated = pending_reference(author, Some("Unrelated topic"), Duration::days(2), now);
    h.store.seed_reference(matching.clone());
    h.store.seed_reference(unrelated.clone());

    let thread = h
        .deps
        .threads
        .create_thread(captured_thread(author, "Python debugging help"))
        .await
        .unwrap();
    let outcome = reconcile_thread(&thread, &h.deps).await.unwrap();

    assert_eq!(outcome, Outcome::Matched(matching.id));
    let completed = h.deps.references.find_reference(matching.id).await.unwrap().unwrap();
    assert_eq!(completed.status, ReferenceStatus::Completed);
    assert!(completed.completed_at.is_some());
    let untouched = h.deps.references.find_reference(unrelated.id).await.unwrap().unwrap();
    assert_eq!(untouched.status, ReferenceStatus::Pending);
    assert!(untouched.completed_at.is_none());
}

#[tokio::test]
async fn manual_post_never_touches_references() {
    let h = memory_harness();
    let author = MemberId::new();
    let now = Utc::now();
    let exact = pending_reference(author, Some("Python debugging help"), Duration::minutes(1), now);
    h.store.seed_reference(exact.clone());

    let thread = h
        .deps
        .threads
        .create_thread(manual_thread(author, "Python debugging help"))
        .await
        .unwrap();
    let outcome = reconcile_thread(&thread, &h.deps).await.unwrap();

    assert_eq!(outcome, Outcome::Skipped);
    let reference = h.deps.references.find_reference(exact.id).await.unwrap().unwrap();
    assert_eq!(reference.status, ReferenceStatus::Pending);
}

#[tokio::test]
async fn other_owners_references_are_not_candidates() {
    let h = memory_harness();
    let now = Utc::now();
    let someone_else = pending_reference(MemberId::new(), Some("Lifetimes"), Duration::minutes(1), now);
    h.store.seed_reference(someone_else.clone());

    let thread = h
        .deps
        .threads
        .create_thread(captured_thread(MemberId::new(), "Lifetimes"))
        .await
        .unwrap();

    assert_eq!(reconcile_thread(&thread, &h.deps).await.unwrap(), Outcome::NoMatch);
}

#[tokio::test]
async fn disabled_config_skips() {
    let mut h = memory_harness();
    h.deps.reconciliation = ReconciliationConfig::disabled();
    let author = MemberId::new();
    h.store
        .seed_reference(pending_reference(author, Some("Traits"), Duration::minutes(1), Utc::now()));

    let thread = h
        .deps
        .threads
        .create_thread(captured_thread(author, "Traits"))
        .await
        .unwrap();

    assert_eq!(reconcile_thread(&thread, &h.deps).await.unwrap(), Outcome::Skipped);
}

#[tokio::test]
async fn recency_is_measured_at_submission_time() {
    let h = memory_harness();
    let author = MemberId::new();
    let submitted_at = Utc::now() - Duration::days(3);
    let reference = pending_reference(author, None, Duration::minutes(30), submitted_at);
    h.store.seed_reference(reference.clone());

    // Submitted three days ago, half an hour after the reference was saved.
    let thread = captured_thread(author, "Untitled capture").into_thread(submitted_at);
    let outcome = reconcile_thread(&thread, &h.deps).await.unwrap();

    assert_eq!(outcome, Outcome::Matched(reference.id));
    let completed = h.deps.references.find_reference(reference.id).await.unwrap().unwrap();
    assert!(completed.completed_at.unwrap() > submitted_at);
}

#[tokio::test]
async fn thread_creation_reconciles_in_background() {
    let h = memory_harness();
    let author = MemberId::new();
    let reference = pending_reference(author, Some("Borrow checker errors"), Duration::minutes(10), Utc::now());
    h.store.seed_reference(reference.clone());

    let thread = create_thread(captured_thread(author, "Borrow checker errors"), &h.deps)
        .await
        .unwrap();
    assert_eq!(thread.author_id, author);

    let references = h.deps.references.clone();
    let completed = eventually(|| {
        let references = references.clone();
        async move {
            references
                .find_reference(reference.id)
                .await
                .unwrap()
                .is_some_and(|r| r.status == ReferenceStatus::Completed)
        }
    })
    .await;
    assert!(completed);
}
