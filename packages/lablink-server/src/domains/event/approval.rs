//! Approval workflow binding for events. No custom permission hook; the
//! engine is constructed with the default [`AllowAll`] strategy.
//!
//! [`AllowAll`]: crate::domains::approval::AllowAll

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::EventId;
use crate::domains::approval::Approvable;

use super::models::Event;

#[async_trait]
impl Approvable for Event {
    const ENTITY_TYPE: &'static str = "EVENT";

    type Id = EventId;

    fn id(&self) -> EventId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn approval_status(&self) -> &str {
        &self.approval_status
    }

    async fn find_by_id(id: EventId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        Event::find_by_id(id, pool).await
    }

    async fn find_pending(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE approval_status = 'PENDING' ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    async fn record_approval(
        id: EventId,
        approved_by: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET approval_status = 'APPROVED',
                approved_by = $2,
                approved_at = CURRENT_DATE,
                updated_at = NOW()
            WHERE id = $1 AND approval_status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(approved_by)
        .fetch_optional(pool)
        .await
    }

    async fn record_rejection(
        id: EventId,
        rejected_by: &str,
        reason: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET approval_status = 'REJECTED',
                rejection_reason = $3,
                approved_by = $2,
                updated_at = NOW()
            WHERE id = $1 AND approval_status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(rejected_by)
        .bind(reason)
        .fetch_optional(pool)
        .await
    }
}
