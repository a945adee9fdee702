use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::models::ActivityLog;

/// What happened, published by the approval engine and the period lifecycle
/// manager and recorded asynchronously by the [`AuditSink`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub action: String, // CREATE, UPDATE, DELETE
    pub target_type: String,
    pub target_id: String,
    pub target_name: String,
    pub description: String,
    pub actor: Option<String>,
}

impl AuditEvent {
    pub fn create(
        target_type: &str,
        target_id: String,
        target_name: &str,
        description: String,
    ) -> Self {
        Self::build("CREATE", target_type, target_id, target_name, description)
    }

    pub fn update(
        target_type: &str,
        target_id: String,
        target_name: &str,
        description: String,
    ) -> Self {
        Self::build("UPDATE", target_type, target_id, target_name, description)
    }

    pub fn delete(
        target_type: &str,
        target_id: String,
        target_name: &str,
        description: String,
    ) -> Self {
        Self::build("DELETE", target_type, target_id, target_name, description)
    }

    pub fn with_actor(mut self, username: &str) -> Self {
        self.actor = Some(username.to_string());
        self
    }

    fn build(
        action: &str,
        target_type: &str,
        target_id: String,
        target_name: &str,
        description: String,
    ) -> Self {
        Self {
            action: action.to_string(),
            target_type: target_type.to_string(),
            target_id,
            target_name: target_name.to_string(),
            description,
            actor: None,
        }
    }
}

/// Fire-and-forget audit recorder.
///
/// `record` spawns the insert on a detached task: a failed write is logged
/// and dropped, never surfaced to the business operation that emitted it.
#[derive(Clone)]
pub struct AuditSink {
    pool: PgPool,
}

impl AuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn record(&self, event: AuditEvent) {
        let pool = self.pool.clone();
        tokio::spawn(async move {
            match ActivityLog::insert(&event, &pool).await {
                Ok(log) => tracing::debug!(
                    action = %log.action,
                    target_type = %log.target_type,
                    target_id = %log.target_id,
                    "activity logged"
                ),
                Err(err) => tracing::error!(error = %err, "failed to save activity log"),
            }
        });
    }
}
