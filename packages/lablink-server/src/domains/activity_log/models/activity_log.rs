use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::ActivityLogId;
use crate::domains::activity_log::sink::AuditEvent;

/// A persisted audit entry.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityLog {
    pub id: ActivityLogId,
    pub action: String, // 'CREATE' | 'UPDATE' | 'DELETE'
    pub target_type: String,
    pub target_id: String,
    pub target_name: String,
    pub description: String,
    pub actor: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    pub async fn insert(event: &AuditEvent, pool: &PgPool) -> Result<Self, sqlx::Error> {
        let log = sqlx::query_as::<_, ActivityLog>(
            r#"
            INSERT INTO activity_logs (
                id, action, target_type, target_id, target_name, description, actor
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(ActivityLogId::new())
        .bind(&event.action)
        .bind(&event.target_type)
        .bind(&event.target_id)
        .bind(&event.target_name)
        .bind(&event.description)
        .bind(&event.actor)
        .fetch_one(pool)
        .await?;
        Ok(log)
    }

    /// Most recent entries first.
    pub async fn find_recent(limit: i64, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let logs = sqlx::query_as::<_, ActivityLog>(
            "SELECT * FROM activity_logs ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(logs)
    }

    pub async fn find_by_target(
        target_type: &str,
        target_id: &str,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let logs = sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT * FROM activity_logs
            WHERE target_type = $1 AND target_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(target_type)
        .bind(target_id)
        .fetch_all(pool)
        .await?;
        Ok(logs)
    }
}
