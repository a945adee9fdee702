//! Integration tests for the academic period lifecycle.
//!
//! Covers the single-active invariant, close-and-roll-forward, cascade
//! delete, and membership management.

mod common;

use std::collections::HashSet;

use test_context::test_context;

use lablink_core::common::{DomainError, MemberId, PeriodId};
use lablink_core::domains::administration::Letter;
use lablink_core::domains::archive::Archive;
use lablink_core::domains::event::models::Event;
use lablink_core::domains::finance::FinanceTransaction;
use lablink_core::domains::member::models::MemberPeriod;
use lablink_core::domains::period::PeriodLifecycle;
use lablink_core::domains::project::models::Project;

use crate::common::{
    create_test_archive, create_test_event, create_test_letter, create_test_member,
    create_test_period, create_test_project, create_test_transaction, TestHarness,
};

fn lifecycle(ctx: &TestHarness) -> PeriodLifecycle {
    PeriodLifecycle::new(ctx.db_pool.clone(), ctx.audit())
}

/// The active flag is global state in the shared test database. Tests that
/// activate a period serialize on this lock so they do not deactivate each
/// other mid-assertion.
static ACTIVE_PERIOD_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

// =============================================================================
// Create / activate
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn creating_period_with_duplicate_code_conflicts(ctx: &TestHarness) {
    let period = create_test_period(&ctx.db_pool, "2025 Odd").await.unwrap();

    let err = lifecycle(ctx)
        .create(&period.code, "Same code again", period.start_date, period.end_date)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn activating_a_period_deactivates_the_previous_one(ctx: &TestHarness) {
    let _guard = ACTIVE_PERIOD_LOCK.lock().await;
    let svc = lifecycle(ctx);
    let p = create_test_period(&ctx.db_pool, "First").await.unwrap();
    let q = create_test_period(&ctx.db_pool, "Second").await.unwrap();

    svc.activate(p.id).await.unwrap();
    let activated = svc.activate(q.id).await.unwrap();
    assert!(activated.is_active);

    let active = svc.get_active().await.unwrap();
    assert_eq!(active.id, q.id);

    let p_reloaded = svc.get_by_id(p.id).await.unwrap();
    assert!(!p_reloaded.is_active);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn archived_period_cannot_be_activated(ctx: &TestHarness) {
    let svc = lifecycle(ctx);
    let p = create_test_period(&ctx.db_pool, "Frozen").await.unwrap();
    svc.archive(p.id).await.unwrap();

    let err = svc.activate(p.id).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_changes_only_provided_fields(ctx: &TestHarness) {
    let svc = lifecycle(ctx);
    let p = create_test_period(&ctx.db_pool, "Before").await.unwrap();

    let changes = lablink_core::domains::period::UpdatePeriod {
        name: Some("After".to_string()),
        ..Default::default()
    };
    let saved = svc.update(p.id, changes).await.unwrap();

    assert_eq!(saved.name, "After");
    assert_eq!(saved.start_date, p.start_date);
    assert_eq!(saved.end_date, p.end_date);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_ignores_blank_name(ctx: &TestHarness) {
    let svc = lifecycle(ctx);
    let p = create_test_period(&ctx.db_pool, "Keep me").await.unwrap();

    let changes = lablink_core::domains::period::UpdatePeriod {
        name: Some("   ".to_string()),
        ..Default::default()
    };
    let saved = svc.update(p.id, changes).await.unwrap();

    assert_eq!(saved.name, "Keep me");
}

// =============================================================================
// Close and roll forward
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn close_rolls_continuing_members_forward(ctx: &TestHarness) {
    let _guard = ACTIVE_PERIOD_LOCK.lock().await;
    let svc = lifecycle(ctx);
    let old = create_test_period(&ctx.db_pool, "Old").await.unwrap();
    let new = create_test_period(&ctx.db_pool, "New").await.unwrap();
    svc.activate(old.id).await.unwrap();

    let continuing = create_test_member(&ctx.db_pool, "BIG_DATA").await.unwrap();
    let graduating = create_test_member(&ctx.db_pool, "GIS").await.unwrap();
    svc.add_member_to_period(old.id, continuing, Some("Lead"))
        .await
        .unwrap();
    svc.add_member_to_period(old.id, graduating, None)
        .await
        .unwrap();

    let mut carry: HashSet<MemberId> = HashSet::new();
    carry.insert(continuing);

    let closed = svc.close(old.id, new.id, &carry).await.unwrap();
    assert!(closed.is_archived);
    assert!(!closed.is_active);

    let active = svc.get_active().await.unwrap();
    assert_eq!(active.id, new.id);

    // Continuing member has a fresh ACTIVE association preserving position.
    let rolled = MemberPeriod::find(continuing, new.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rolled.status, "ACTIVE");
    assert_eq!(rolled.position.as_deref(), Some("Lead"));
    assert!(rolled.graduated_at.is_none());

    // Both old associations became ALUMNI with a graduation stamp.
    for member_id in [continuing, graduating] {
        let old_assoc = MemberPeriod::find(member_id, old.id, &ctx.db_pool)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(old_assoc.status, "ALUMNI");
        assert!(old_assoc.graduated_at.is_some());
    }

    // The graduating member did not carry over.
    assert!(MemberPeriod::find(graduating, new.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn only_the_active_period_can_be_closed(ctx: &TestHarness) {
    let svc = lifecycle(ctx);
    let inactive = create_test_period(&ctx.db_pool, "Inactive").await.unwrap();
    let target = create_test_period(&ctx.db_pool, "Target").await.unwrap();

    let err = svc
        .close(inactive.id, target.id, &HashSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn close_into_missing_period_is_not_found(ctx: &TestHarness) {
    let _guard = ACTIVE_PERIOD_LOCK.lock().await;
    let svc = lifecycle(ctx);
    let old = create_test_period(&ctx.db_pool, "Old").await.unwrap();
    svc.activate(old.id).await.unwrap();

    let err = svc
        .close(old.id, PeriodId::new(), &HashSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));

    // Nothing changed.
    assert!(svc.get_by_id(old.id).await.unwrap().is_active);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn close_into_archived_target_is_invalid(ctx: &TestHarness) {
    let _guard = ACTIVE_PERIOD_LOCK.lock().await;
    let svc = lifecycle(ctx);
    let old = create_test_period(&ctx.db_pool, "Old").await.unwrap();
    let target = create_test_period(&ctx.db_pool, "Frozen target").await.unwrap();
    svc.activate(old.id).await.unwrap();
    svc.archive(target.id).await.unwrap();

    let err = svc
        .close(old.id, target.id, &HashSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));

    // Nothing changed: source still active, target still frozen.
    assert!(svc.get_by_id(old.id).await.unwrap().is_active);
    let target_reloaded = svc.get_by_id(target.id).await.unwrap();
    assert!(target_reloaded.is_archived);
    assert!(!target_reloaded.is_active);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn period_cannot_be_closed_into_itself(ctx: &TestHarness) {
    let _guard = ACTIVE_PERIOD_LOCK.lock().await;
    let svc = lifecycle(ctx);
    let p = create_test_period(&ctx.db_pool, "Self").await.unwrap();
    svc.activate(p.id).await.unwrap();

    let err = svc.close(p.id, p.id, &HashSet::new()).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));

    let reloaded = svc.get_by_id(p.id).await.unwrap();
    assert!(reloaded.is_active);
    assert!(!reloaded.is_archived);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn failed_close_rolls_everything_back(ctx: &TestHarness) {
    let _guard = ACTIVE_PERIOD_LOCK.lock().await;
    let svc = lifecycle(ctx);
    let old = create_test_period(&ctx.db_pool, "Old").await.unwrap();
    let new = create_test_period(&ctx.db_pool, "New").await.unwrap();
    svc.activate(old.id).await.unwrap();

    let member = create_test_member(&ctx.db_pool, "BIG_DATA").await.unwrap();
    svc.add_member_to_period(old.id, member, Some("Lead"))
        .await
        .unwrap();
    // Pre-register the member in the target so the roll-forward INSERT
    // hits the primary key and the whole close aborts.
    svc.add_member_to_period(new.id, member, None).await.unwrap();

    let mut carry: HashSet<MemberId> = HashSet::new();
    carry.insert(member);

    let err = svc.close(old.id, new.id, &carry).await.unwrap_err();
    assert!(matches!(err, DomainError::Database(_)));

    // Source period untouched, association still ACTIVE.
    let old_reloaded = svc.get_by_id(old.id).await.unwrap();
    assert!(old_reloaded.is_active);
    assert!(!old_reloaded.is_archived);

    let assoc = MemberPeriod::find(member, old.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assoc.status, "ACTIVE");
    assert!(assoc.graduated_at.is_none());
}

// =============================================================================
// Cascade delete
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn active_period_cannot_be_deleted(ctx: &TestHarness) {
    let _guard = ACTIVE_PERIOD_LOCK.lock().await;
    let svc = lifecycle(ctx);
    let p = create_test_period(&ctx.db_pool, "Active").await.unwrap();
    svc.activate(p.id).await.unwrap();

    let err = svc.delete(p.id).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));
    assert!(svc.get_by_id(p.id).await.unwrap().is_active);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_cascades_through_period_scoped_records(ctx: &TestHarness) {
    let _guard = ACTIVE_PERIOD_LOCK.lock().await;
    let svc = lifecycle(ctx);
    let doomed = create_test_period(&ctx.db_pool, "Doomed").await.unwrap();
    let survivor = create_test_period(&ctx.db_pool, "Survivor").await.unwrap();
    svc.activate(doomed.id).await.unwrap();

    let member = create_test_member(&ctx.db_pool, "BIG_DATA").await.unwrap();
    svc.add_member_to_period(doomed.id, member, None).await.unwrap();

    let project = create_test_project(&ctx.db_pool, "BIG_DATA", member, Some(doomed.id))
        .await
        .unwrap();
    let event = create_test_event(&ctx.db_pool, member, Some(doomed.id))
        .await
        .unwrap();
    create_test_letter(&ctx.db_pool, doomed.id).await.unwrap();
    create_test_transaction(&ctx.db_pool, doomed.id, Some(project.id), None)
        .await
        .unwrap();
    create_test_archive(&ctx.db_pool, Some(project.id), None)
        .await
        .unwrap();
    create_test_archive(&ctx.db_pool, None, Some(event.id))
        .await
        .unwrap();

    // Hand activity to another period, then delete.
    svc.activate(survivor.id).await.unwrap();
    svc.delete(doomed.id).await.unwrap();

    let err = svc.get_by_id(doomed.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));

    assert!(Project::find_by_period(doomed.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_empty());
    assert!(Event::find_by_period(doomed.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_empty());
    assert!(Letter::find_by_period(doomed.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_empty());
    assert!(FinanceTransaction::find_by_period(doomed.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_empty());
    assert!(Archive::find_by_project(project.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_empty());
    assert!(Archive::find_by_event(event.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_empty());
    assert!(MemberPeriod::find(member, doomed.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());

    // The member profile itself survives the cascade.
    assert!(
        lablink_core::domains::member::models::ResearchAssistant::find_by_id(
            member,
            &ctx.db_pool
        )
        .await
        .unwrap()
        .is_some()
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn deleting_twice_is_not_found(ctx: &TestHarness) {
    let svc = lifecycle(ctx);
    let p = create_test_period(&ctx.db_pool, "Gone").await.unwrap();

    svc.delete(p.id).await.unwrap();
    let err = svc.delete(p.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

// =============================================================================
// Membership
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn added_member_appears_once_with_position(ctx: &TestHarness) {
    let svc = lifecycle(ctx);
    let p = create_test_period(&ctx.db_pool, "Roster").await.unwrap();
    let member = create_test_member(&ctx.db_pool, "CYBER_SECURITY").await.unwrap();

    svc.add_member_to_period(p.id, member, Some("Treasurer"))
        .await
        .unwrap();

    let roster = svc.members_of_period(p.id).await.unwrap();
    let entries: Vec<_> = roster.iter().filter(|mp| mp.member_id == member).collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].position.as_deref(), Some("Treasurer"));
    assert_eq!(entries[0].status, "ACTIVE");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn adding_member_twice_conflicts(ctx: &TestHarness) {
    let svc = lifecycle(ctx);
    let p = create_test_period(&ctx.db_pool, "Roster").await.unwrap();
    let member = create_test_member(&ctx.db_pool, "GIS").await.unwrap();

    svc.add_member_to_period(p.id, member, None).await.unwrap();
    let err = svc
        .add_member_to_period(p.id, member, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn cannot_add_member_to_archived_period(ctx: &TestHarness) {
    let svc = lifecycle(ctx);
    let p = create_test_period(&ctx.db_pool, "Closed").await.unwrap();
    svc.archive(p.id).await.unwrap();

    let member = create_test_member(&ctx.db_pool, "GIS").await.unwrap();
    let err = svc
        .add_member_to_period(p.id, member, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn adding_missing_member_is_not_found(ctx: &TestHarness) {
    let svc = lifecycle(ctx);
    let p = create_test_period(&ctx.db_pool, "Roster").await.unwrap();

    let err = svc
        .add_member_to_period(p.id, MemberId::new(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

// =============================================================================
// Boundary mapping
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn period_data_reports_headline_counts(ctx: &TestHarness) {
    let svc = lifecycle(ctx);
    let p = create_test_period(&ctx.db_pool, "Counted").await.unwrap();

    let member = create_test_member(&ctx.db_pool, "BIG_DATA").await.unwrap();
    svc.add_member_to_period(p.id, member, Some("Secretary"))
        .await
        .unwrap();
    create_test_project(&ctx.db_pool, "BIG_DATA", member, Some(p.id))
        .await
        .unwrap();
    create_test_event(&ctx.db_pool, member, Some(p.id)).await.unwrap();
    create_test_event(&ctx.db_pool, member, Some(p.id)).await.unwrap();

    let period = svc.get_by_id(p.id).await.unwrap();
    let data = lablink_core::domains::period::PeriodData::load(period, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(data.total_members, 1);
    assert_eq!(data.total_projects, 1);
    assert_eq!(data.total_events, 2);

    let roster = svc.members_of_period(p.id).await.unwrap();
    let entry = lablink_core::domains::member::MemberPeriodData::load(
        roster.into_iter().next().unwrap(),
        &ctx.db_pool,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(entry.member_id, member.to_string());
    assert_eq!(entry.position.as_deref(), Some("Secretary"));
}

// =============================================================================
// Audit trail
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn lifecycle_operations_write_activity_logs(ctx: &TestHarness) {
    let _guard = ACTIVE_PERIOD_LOCK.lock().await;
    let svc = lifecycle(ctx);
    let p = svc
        .create(
            &format!("audit-{}", uuid::Uuid::new_v4()),
            "Audited",
            chrono::NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
        )
        .await
        .unwrap();
    svc.activate(p.id).await.unwrap();

    ctx.settle().await;

    let logs = lablink_core::domains::activity_log::ActivityLog::find_by_target(
        "PERIOD",
        &p.id.to_string(),
        &ctx.db_pool,
    )
    .await
    .unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().any(|l| l.action == "CREATE"));
    assert!(logs.iter().any(|l| l.description.starts_with("Activated period:")));
}
