use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MemberId, PeriodId, ProjectId};

/// A research project. Created PENDING; a division head, research
/// coordinator or admin decides its approval.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: ProjectId,
    pub project_code: String, // RST-0001, PKM-0001, ...
    pub name: String,
    pub division: String,      // BIG_DATA, CYBER_SECURITY, GIS, GAME_TECH, CROSS_DIVISION
    pub activity_type: String, // RISET, HKI, PENGABDIAN
    pub status: String,        // NOT_STARTED, IN_PROGRESS, ON_HOLD, COMPLETED, CANCELLED
    pub description: Option<String>,
    pub progress_percent: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub leader_id: MemberId,
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

impl Project {
    pub async fn find_by_id(id: ProjectId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_period(
        period_id: PeriodId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE period_id = $1 ORDER BY created_at",
        )
        .bind(period_id)
        .fetch_all(pool)
        .await
    }

    pub async fn count_by_period(period_id: PeriodId, pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE period_id = $1")
            .bind(period_id)
            .fetch_one(pool)
            .await
    }

    /// Insert a new project; approval starts PENDING.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        project_code: &str,
        name: &str,
        division: &str,
        activity_type: &str,
        description: Option<&str>,
        leader_id: MemberId,
        period_id: Option<PeriodId>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                id, project_code, name, division, activity_type, description,
                leader_id, period_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(ProjectId::new())
        .bind(project_code)
        .bind(name)
        .bind(division)
        .bind(activity_type)
        .bind(description)
        .bind(leader_id)
        .bind(period_id)
        .fetch_one(pool)
        .await
    }
}
