//! Orchestration of the period lifecycle: create, activate, close (roll
//! members forward), archive, cascade delete, membership management.
//!
//! Every mutating operation is all-or-nothing: multi-row updates run inside
//! one transaction, and an error anywhere rolls the whole thing back.

use chrono::NaiveDate;
use sqlx::PgPool;
use std::collections::HashSet;

use crate::common::{DomainError, MemberId, PeriodId};
use crate::domains::activity_log::{AuditEvent, AuditSink};
use crate::domains::member::models::{MemberPeriod, ResearchAssistant};

use super::models::AcademicPeriod;

/// Partial metadata update for a period.
#[derive(Debug, Clone, Default)]
pub struct UpdatePeriod {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub struct PeriodLifecycle {
    pool: PgPool,
    audit: AuditSink,
}

impl PeriodLifecycle {
    pub fn new(pool: PgPool, audit: AuditSink) -> Self {
        Self { pool, audit }
    }

    // ========== CREATE ==========

    /// Create a period with a unique code. Starts inactive, unarchived.
    pub async fn create(
        &self,
        code: &str,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<AcademicPeriod, DomainError> {
        if AcademicPeriod::find_by_code(code, &self.pool).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "period with code {} already exists",
                code
            )));
        }

        let period = AcademicPeriod::create(code, name, start_date, end_date, &self.pool).await?;

        self.audit.record(AuditEvent::create(
            "PERIOD",
            period.id.to_string(),
            &period.name,
            format!("Created academic period: {}", period.code),
        ));

        Ok(period)
    }

    // ========== READ ==========

    pub async fn get_by_id(&self, id: PeriodId) -> Result<AcademicPeriod, DomainError> {
        AcademicPeriod::find_by_id(id, &self.pool)
            .await?
            .ok_or_else(|| DomainError::NotFound("period not found".to_string()))
    }

    pub async fn get_active(&self) -> Result<AcademicPeriod, DomainError> {
        AcademicPeriod::find_active(&self.pool)
            .await?
            .ok_or_else(|| DomainError::NotFound("no active period".to_string()))
    }

    pub async fn list_all(&self) -> Result<Vec<AcademicPeriod>, DomainError> {
        Ok(AcademicPeriod::find_all(&self.pool).await?)
    }

    pub async fn members_of_period(
        &self,
        period_id: PeriodId,
    ) -> Result<Vec<MemberPeriod>, DomainError> {
        self.get_by_id(period_id).await?;
        Ok(MemberPeriod::find_by_period(period_id, &self.pool).await?)
    }

    // ========== ACTIVATE ==========

    /// Make `id` the single active period, deactivating whichever period
    /// was active before. Archived periods cannot be activated.
    pub async fn activate(&self, id: PeriodId) -> Result<AcademicPeriod, DomainError> {
        let mut tx = self.pool.begin().await?;

        let period =
            sqlx::query_as::<_, AcademicPeriod>("SELECT * FROM academic_periods WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| DomainError::NotFound("period not found".to_string()))?;

        if period.is_archived {
            return Err(DomainError::InvalidState(
                "cannot activate an archived period".to_string(),
            ));
        }

        // Deactivate-old must run before activate-new: the partial unique
        // index on is_active checks each statement as it executes.
        sqlx::query(
            "UPDATE academic_periods SET is_active = FALSE, updated_at = NOW()
             WHERE is_active = TRUE AND id <> $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let saved = sqlx::query_as::<_, AcademicPeriod>(
            "UPDATE academic_periods SET is_active = TRUE, updated_at = NOW()
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        self.audit.record(AuditEvent::update(
            "PERIOD",
            saved.id.to_string(),
            &saved.name,
            format!("Activated period: {}", saved.code),
        ));

        Ok(saved)
    }

    // ========== UPDATE ==========

    /// Partial metadata update. Absent fields keep their value; a blank
    /// name is treated as absent.
    pub async fn update(
        &self,
        id: PeriodId,
        changes: UpdatePeriod,
    ) -> Result<AcademicPeriod, DomainError> {
        self.get_by_id(id).await?;

        let name = changes.name.filter(|n| !n.trim().is_empty());

        let saved = sqlx::query_as::<_, AcademicPeriod>(
            r#"
            UPDATE academic_periods
            SET name = COALESCE($2, name),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .fetch_one(&self.pool)
        .await?;

        self.audit.record(AuditEvent::update(
            "PERIOD",
            saved.id.to_string(),
            &saved.name,
            format!("Updated period: {}", saved.code),
        ));

        Ok(saved)
    }

    // ========== ARCHIVE ==========

    /// Freeze a period without closing it into a successor. Deactivates it
    /// if it happens to be active.
    pub async fn archive(&self, id: PeriodId) -> Result<AcademicPeriod, DomainError> {
        self.get_by_id(id).await?;

        let saved = sqlx::query_as::<_, AcademicPeriod>(
            "UPDATE academic_periods SET is_active = FALSE, is_archived = TRUE, updated_at = NOW()
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        self.audit.record(AuditEvent::update(
            "PERIOD",
            saved.id.to_string(),
            &saved.name,
            format!("Archived period: {}", saved.code),
        ));

        Ok(saved)
    }

    // ========== CLOSE PERIOD ==========

    /// Close the active period `id` into `new_period_id`.
    ///
    /// Continuing members get a fresh ACTIVE association in the target
    /// period preserving their position; every source association becomes
    /// ALUMNI with a graduation stamp. The source ends up archived and
    /// inactive, the target active. One transaction, all-or-nothing.
    pub async fn close(
        &self,
        id: PeriodId,
        new_period_id: PeriodId,
        continuing_member_ids: &HashSet<MemberId>,
    ) -> Result<AcademicPeriod, DomainError> {
        if id == new_period_id {
            return Err(DomainError::InvalidState(
                "cannot close a period into itself".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let old_period =
            sqlx::query_as::<_, AcademicPeriod>("SELECT * FROM academic_periods WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| DomainError::NotFound("period not found".to_string()))?;

        if !old_period.is_active {
            return Err(DomainError::InvalidState(
                "only the active period can be closed".to_string(),
            ));
        }

        let new_period =
            sqlx::query_as::<_, AcademicPeriod>("SELECT * FROM academic_periods WHERE id = $1")
                .bind(new_period_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| DomainError::NotFound("new period not found".to_string()))?;

        // Same rule as activate(): an archived period can never become active.
        if new_period.is_archived {
            return Err(DomainError::InvalidState(
                "cannot close into an archived period".to_string(),
            ));
        }

        let active_members = sqlx::query_as::<_, MemberPeriod>(
            "SELECT * FROM member_periods WHERE period_id = $1 AND status = 'ACTIVE'",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        for mp in &active_members {
            if continuing_member_ids.contains(&mp.member_id) {
                sqlx::query(
                    r#"
                    INSERT INTO member_periods (member_id, period_id, status, position, joined_at)
                    VALUES ($1, $2, 'ACTIVE', $3, NOW())
                    "#,
                )
                .bind(mp.member_id)
                .bind(new_period.id)
                .bind(&mp.position)
                .execute(&mut *tx)
                .await?;
            }
        }

        sqlx::query(
            "UPDATE member_periods SET status = 'ALUMNI', graduated_at = NOW()
             WHERE period_id = $1 AND status = 'ACTIVE'",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        // Deactivate-and-archive the source before activating the target,
        // same index constraint as in activate().
        let closed = sqlx::query_as::<_, AcademicPeriod>(
            "UPDATE academic_periods SET is_active = FALSE, is_archived = TRUE, updated_at = NOW()
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE academic_periods SET is_active = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(new_period.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.audit.record(AuditEvent::update(
            "PERIOD",
            closed.id.to_string(),
            &closed.name,
            format!("Closed and archived period: {}", closed.code),
        ));

        Ok(closed)
    }

    // ========== DELETE PERIOD ==========

    /// Delete an inactive period and everything scoped to it.
    ///
    /// Cascade order follows foreign-key direction and is part of the
    /// contract: archives hang off projects/events and must go first.
    ///   1. archives referencing the period's projects or events
    ///   2. letters
    ///   3. projects
    ///   4. events
    ///   5. finance transactions
    ///   6. member-period associations
    ///   7. the period row itself
    pub async fn delete(&self, id: PeriodId) -> Result<(), DomainError> {
        let period = AcademicPeriod::find_by_id(id, &self.pool)
            .await?
            .ok_or_else(|| DomainError::NotFound("period not found".to_string()))?;

        if period.is_active {
            return Err(DomainError::InvalidState(
                "cannot delete the active period; activate another period first".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM archives
            WHERE project_id IN (SELECT id FROM projects WHERE period_id = $1)
               OR event_id IN (SELECT id FROM events WHERE period_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM letters WHERE period_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM projects WHERE period_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM events WHERE period_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM finance_transactions WHERE period_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM member_periods WHERE period_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM academic_periods WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.audit.record(AuditEvent::delete(
            "PERIOD",
            period.id.to_string(),
            &period.name,
            format!("Deleted period with cascade: {}", period.code),
        ));

        Ok(())
    }

    // ========== MEMBER MANAGEMENT ==========

    /// Register a member in a period with an optional position.
    pub async fn add_member_to_period(
        &self,
        period_id: PeriodId,
        member_id: MemberId,
        position: Option<&str>,
    ) -> Result<MemberPeriod, DomainError> {
        let period = self.get_by_id(period_id).await?;

        if period.is_archived {
            return Err(DomainError::InvalidState(
                "cannot add members to an archived period".to_string(),
            ));
        }

        ResearchAssistant::find_by_id(member_id, &self.pool)
            .await?
            .ok_or_else(|| DomainError::NotFound("member not found".to_string()))?;

        if MemberPeriod::find(member_id, period_id, &self.pool)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "member is already registered in this period".to_string(),
            ));
        }

        Ok(MemberPeriod::create(member_id, period_id, position, &self.pool).await?)
    }
}
