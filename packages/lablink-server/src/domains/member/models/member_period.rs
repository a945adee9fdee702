use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MemberId, PeriodId};

/// Junction row tying a member to an academic period.
///
/// Composite key (member_id, period_id); a member can hold different
/// positions across periods. Becomes ALUMNI with a `graduated_at` stamp
/// when a period closes without the member continuing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberPeriod {
    pub member_id: MemberId,
    pub period_id: PeriodId,
    pub status: String, // 'ACTIVE' | 'ALUMNI'
    pub position: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub graduated_at: Option<DateTime<Utc>>,
}

/// Membership status within one period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberPeriodStatus {
    Active,
    Alumni,
}

impl MemberPeriodStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberPeriodStatus::Active => "ACTIVE",
            MemberPeriodStatus::Alumni => "ALUMNI",
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl MemberPeriod {
    pub async fn find(
        member_id: MemberId,
        period_id: PeriodId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, MemberPeriod>(
            "SELECT * FROM member_periods WHERE member_id = $1 AND period_id = $2",
        )
        .bind(member_id)
        .bind(period_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_period(
        period_id: PeriodId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, MemberPeriod>(
            "SELECT * FROM member_periods WHERE period_id = $1 ORDER BY joined_at",
        )
        .bind(period_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_active_by_period(
        period_id: PeriodId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, MemberPeriod>(
            "SELECT * FROM member_periods WHERE period_id = $1 AND status = 'ACTIVE' ORDER BY joined_at",
        )
        .bind(period_id)
        .fetch_all(pool)
        .await
    }

    pub async fn count_by_period(period_id: PeriodId, pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM member_periods WHERE period_id = $1")
            .bind(period_id)
            .fetch_one(pool)
            .await
    }

    /// Insert a fresh ACTIVE association.
    pub async fn create(
        member_id: MemberId,
        period_id: PeriodId,
        position: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, MemberPeriod>(
            r#"
            INSERT INTO member_periods (member_id, period_id, status, position, joined_at)
            VALUES ($1, $2, 'ACTIVE', $3, NOW())
            RETURNING *
            "#,
        )
        .bind(member_id)
        .bind(period_id)
        .bind(position)
        .fetch_one(pool)
        .await
    }
}
