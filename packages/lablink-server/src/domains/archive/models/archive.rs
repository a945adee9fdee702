use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ArchiveId, EventId, ProjectId};

/// A document produced by a project or event (report, publication, photo
/// set). `source_type` says which side of project_id/event_id is filled.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Archive {
    pub id: ArchiveId,
    pub archive_code: String,
    pub title: String,
    pub description: Option<String>,
    pub archive_type: String,
    pub department: String,
    pub source_type: String, // PROJECT or EVENT
    pub project_id: Option<ProjectId>,
    pub event_id: Option<EventId>,
    pub publish_location: Option<String>,
    pub reference_number: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Archive {
    pub async fn find_by_id(id: ArchiveId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Archive>("SELECT * FROM archives WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_project(
        project_id: ProjectId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Archive>(
            "SELECT * FROM archives WHERE project_id = $1 ORDER BY created_at",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_event(
        event_id: EventId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Archive>("SELECT * FROM archives WHERE event_id = $1 ORDER BY created_at")
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        archive_code: &str,
        title: &str,
        archive_type: &str,
        department: &str,
        project_id: Option<ProjectId>,
        event_id: Option<EventId>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        let source_type = if project_id.is_some() { "PROJECT" } else { "EVENT" };
        sqlx::query_as::<_, Archive>(
            r#"
            INSERT INTO archives
                (id, archive_code, title, archive_type, department, source_type,
                 project_id, event_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(ArchiveId::new())
        .bind(archive_code)
        .bind(title)
        .bind(archive_type)
        .bind(department)
        .bind(source_type)
        .bind(project_id)
        .bind(event_id)
        .fetch_one(pool)
        .await
    }
}
