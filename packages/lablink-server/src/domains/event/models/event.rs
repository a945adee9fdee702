use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{EventId, MemberId, PeriodId};

/// A lab event (workshop, seminar, gathering). Created PENDING.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: EventId,
    pub event_code: String, // EVT-0001
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String, // PLANNED, ONGOING, COMPLETED, CANCELLED
    pub pic_id: MemberId,
    pub period_id: Option<PeriodId>,

    // Approval workflow
    pub approval_status: String, // 'PENDING' | 'APPROVED' | 'REJECTED'
    pub rejection_reason: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Event {
    pub async fn find_by_id(id: EventId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_period(
        period_id: PeriodId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE period_id = $1 ORDER BY start_date")
            .bind(period_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_period(period_id: PeriodId, pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events WHERE period_id = $1")
            .bind(period_id)
            .fetch_one(pool)
            .await
    }

    /// Insert a new event; approval starts PENDING.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        event_code: &str,
        name: &str,
        description: Option<&str>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        pic_id: MemberId,
        period_id: Option<PeriodId>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                id, event_code, name, description, start_date, end_date, pic_id, period_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(EventId::new())
        .bind(event_code)
        .bind(name)
        .bind(description)
        .bind(start_date)
        .bind(end_date)
        .bind(pic_id)
        .bind(period_id)
        .fetch_one(pool)
        .await
    }
}
