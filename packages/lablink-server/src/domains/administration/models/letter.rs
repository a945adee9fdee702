use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{LetterId, MemberId, PeriodId};

/// An outgoing letter, scoped to the period it was issued in.
/// `letter_number` stays empty until the letter is issued
/// (format: 001/PMJ/EXT/MBC/XII/2025).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Letter {
    pub id: LetterId,
    pub letter_number: Option<String>,
    pub letter_type: String, // PMJ, IZN, STF, SP, UND
    pub category: String,    // RK, INT, EXT, WSH
    pub subject: String,
    pub recipient: String,
    pub requester_id: Option<MemberId>,
    pub period_id: Option<PeriodId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Letter {
    pub async fn find_by_id(id: LetterId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Letter>("SELECT * FROM letters WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_period(
        period_id: PeriodId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Letter>("SELECT * FROM letters WHERE period_id = $1 ORDER BY created_at")
            .bind(period_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        letter_type: &str,
        category: &str,
        subject: &str,
        recipient: &str,
        requester_id: Option<MemberId>,
        period_id: Option<PeriodId>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Letter>(
            r#"
            INSERT INTO letters (id, letter_type, category, subject, recipient, requester_id, period_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(LetterId::new())
        .bind(letter_type)
        .bind(category)
        .bind(subject)
        .bind(recipient)
        .bind(requester_id)
        .bind(period_id)
        .fetch_one(pool)
        .await
    }
}
