//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.
//! Codes get a uuid suffix so tests can share one database without
//! tripping over unique constraints.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use lablink_core::common::{EventId, MemberId, PeriodId, ProjectId};
use lablink_core::domains::administration::Letter;
use lablink_core::domains::archive::Archive;
use lablink_core::domains::event::models::Event;
use lablink_core::domains::finance::{FinanceTransaction, TransactionType};
use lablink_core::domains::member::models::ResearchAssistant;
use lablink_core::domains::period::models::AcademicPeriod;
use lablink_core::domains::project::models::Project;

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Create a test member in the given division.
pub async fn create_test_member(pool: &PgPool, division: &str) -> Result<MemberId> {
    let member = ResearchAssistant::create(
        &unique("member"),
        "Test Member",
        division,
        "Informatics",
        pool,
    )
    .await?;
    Ok(member.id)
}

/// Create a test period. Starts inactive and unarchived.
pub async fn create_test_period(pool: &PgPool, name: &str) -> Result<AcademicPeriod> {
    let period = AcademicPeriod::create(
        &unique("period"),
        name,
        date(2025, 9, 1),
        date(2026, 8, 31),
        pool,
    )
    .await?;
    Ok(period)
}

/// Create a pending project led by `leader_id` in `division`.
pub async fn create_test_project(
    pool: &PgPool,
    division: &str,
    leader_id: MemberId,
    period_id: Option<PeriodId>,
) -> Result<Project> {
    let project = Project::create(
        &unique("proj"),
        "Test Project",
        division,
        "RESEARCH",
        Some("A project created by tests"),
        leader_id,
        period_id,
        pool,
    )
    .await?;
    Ok(project)
}

/// Create a pending event with `pic_id` as person in charge.
pub async fn create_test_event(
    pool: &PgPool,
    pic_id: MemberId,
    period_id: Option<PeriodId>,
) -> Result<Event> {
    let event = Event::create(
        &unique("event"),
        "Test Event",
        Some("An event created by tests"),
        date(2025, 10, 1),
        date(2025, 10, 2),
        pic_id,
        period_id,
        pool,
    )
    .await?;
    Ok(event)
}

/// Create a letter scoped to `period_id`.
pub async fn create_test_letter(pool: &PgPool, period_id: PeriodId) -> Result<Letter> {
    let letter = Letter::create(
        "PMJ",
        "EXT",
        "Test subject",
        "Test recipient",
        None,
        Some(period_id),
        pool,
    )
    .await?;
    Ok(letter)
}

/// Create an expense transaction scoped to `period_id`.
pub async fn create_test_transaction(
    pool: &PgPool,
    period_id: PeriodId,
    project_id: Option<ProjectId>,
    event_id: Option<EventId>,
) -> Result<FinanceTransaction> {
    let tx = FinanceTransaction::create(
        TransactionType::Expense,
        Decimal::new(150_000, 2),
        date(2025, 10, 15),
        "Test expense",
        project_id,
        event_id,
        Some(period_id),
        pool,
    )
    .await?;
    Ok(tx)
}

/// Create an archive document attached to a project or event.
pub async fn create_test_archive(
    pool: &PgPool,
    project_id: Option<ProjectId>,
    event_id: Option<EventId>,
) -> Result<Archive> {
    let archive = Archive::create(
        &unique("arc"),
        "Test Archive",
        "REPORT",
        "Informatics",
        project_id,
        event_id,
        pool,
    )
    .await?;
    Ok(archive)
}
