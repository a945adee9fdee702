use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::PeriodId;

/// A bounded administrative term (e.g. code "2025-2026").
///
/// When `is_archived` is set the period's records are frozen; an archived
/// period can never become active again.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AcademicPeriod {
    pub id: PeriodId,
    pub code: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl AcademicPeriod {
    pub async fn find_by_id(id: PeriodId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, AcademicPeriod>("SELECT * FROM academic_periods WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_code(code: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, AcademicPeriod>("SELECT * FROM academic_periods WHERE code = $1")
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// The single active period, if any.
    pub async fn find_active(pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, AcademicPeriod>(
            "SELECT * FROM academic_periods WHERE is_active = TRUE",
        )
        .fetch_optional(pool)
        .await
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, AcademicPeriod>(
            "SELECT * FROM academic_periods ORDER BY start_date DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Insert a new period. Starts inactive and unarchived.
    pub async fn create(
        code: &str,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, AcademicPeriod>(
            r#"
            INSERT INTO academic_periods (id, code, name, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(PeriodId::new())
        .bind(code)
        .bind(name)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(pool)
        .await
    }
}
