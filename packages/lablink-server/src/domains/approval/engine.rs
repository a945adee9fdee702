use async_trait::async_trait;
use sqlx::PgPool;
use std::fmt::Display;
use std::sync::Arc;

use crate::common::{Actor, DomainError};
use crate::domains::activity_log::{AuditEvent, AuditSink};

use super::permission::{AllowAll, ApprovalPermission};
use super::status::ApprovalStatus;

/// Contract for entities that participate in the PENDING -> APPROVED/REJECTED
/// workflow. Combines the capability surface the engine reads (type tag, id,
/// display name, current status) with the per-type persistence it drives.
///
/// Implemented by Project and Event.
#[async_trait]
pub trait Approvable: Send + Sync + Sized + 'static {
    /// Tag used in audit records, e.g. "PROJECT".
    const ENTITY_TYPE: &'static str;

    type Id: Copy + Display + Send + Sync;

    fn id(&self) -> Self::Id;

    /// Human-readable name for audit messages.
    fn display_name(&self) -> &str;

    /// Stored approval status ("PENDING", "APPROVED", "REJECTED").
    fn approval_status(&self) -> &str;

    async fn find_by_id(id: Self::Id, pool: &PgPool) -> Result<Option<Self>, sqlx::Error>;

    async fn find_pending(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error>;

    /// Persist an approval. The UPDATE is guarded by
    /// `approval_status = 'PENDING'` so check-and-set is atomic at the
    /// storage layer; returns `None` when the row was already decided.
    async fn record_approval(
        id: Self::Id,
        approved_by: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error>;

    /// Persist a rejection, same guard as [`Approvable::record_approval`].
    async fn record_rejection(
        id: Self::Id,
        rejected_by: &str,
        reason: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error>;
}

/// Generic approval service: list-pending, approve, reject.
///
/// Written once; bound to a concrete entity type by the [`Approvable`]
/// impl and an optional [`ApprovalPermission`] strategy supplied at
/// construction.
pub struct ApprovalEngine<E: Approvable> {
    pool: PgPool,
    audit: AuditSink,
    permission: Arc<dyn ApprovalPermission<E>>,
}

impl<E: Approvable> ApprovalEngine<E> {
    /// Engine with the default no-op permission hook.
    pub fn new(pool: PgPool, audit: AuditSink) -> Self {
        Self {
            pool,
            audit,
            permission: Arc::new(AllowAll),
        }
    }

    /// Engine with a domain RBAC hook.
    pub fn with_permission(
        pool: PgPool,
        audit: AuditSink,
        permission: Arc<dyn ApprovalPermission<E>>,
    ) -> Self {
        Self {
            pool,
            audit,
            permission,
        }
    }

    /// All entities still awaiting a decision.
    pub async fn list_pending(&self) -> Result<Vec<E>, DomainError> {
        Ok(E::find_pending(&self.pool).await?)
    }

    /// Approve a pending entity on behalf of `actor`.
    pub async fn approve(&self, id: E::Id, actor: &Actor) -> Result<E, DomainError> {
        let entity = self.load_pending(id).await?;
        self.permission.check(&entity, actor)?;

        let saved = E::record_approval(id, &actor.username, &self.pool)
            .await?
            .ok_or_else(|| Self::already_decided(entity.approval_status()))?;

        self.audit.record(
            AuditEvent::update(
                E::ENTITY_TYPE,
                saved.id().to_string(),
                saved.display_name(),
                format!(
                    "Approved {}: {}",
                    E::ENTITY_TYPE.to_lowercase(),
                    saved.display_name()
                ),
            )
            .with_actor(&actor.username),
        );

        Ok(saved)
    }

    /// Reject a pending entity with a reason on behalf of `actor`.
    pub async fn reject(
        &self,
        id: E::Id,
        reason: &str,
        actor: &Actor,
    ) -> Result<E, DomainError> {
        let entity = self.load_pending(id).await?;
        self.permission.check(&entity, actor)?;

        let saved = E::record_rejection(id, &actor.username, reason, &self.pool)
            .await?
            .ok_or_else(|| Self::already_decided(entity.approval_status()))?;

        self.audit.record(
            AuditEvent::update(
                E::ENTITY_TYPE,
                saved.id().to_string(),
                saved.display_name(),
                format!(
                    "Rejected {}: {} - Reason: {}",
                    E::ENTITY_TYPE.to_lowercase(),
                    saved.display_name(),
                    reason
                ),
            )
            .with_actor(&actor.username),
        );

        Ok(saved)
    }

    async fn load_pending(&self, id: E::Id) -> Result<E, DomainError> {
        let entity = E::find_by_id(id, &self.pool).await?.ok_or_else(|| {
            DomainError::NotFound(format!(
                "{} {} not found",
                E::ENTITY_TYPE.to_lowercase(),
                id
            ))
        })?;

        if !ApprovalStatus::is_pending(entity.approval_status()) {
            return Err(Self::already_decided(entity.approval_status()));
        }

        Ok(entity)
    }

    fn already_decided(status: &str) -> DomainError {
        DomainError::InvalidState(format!(
            "{} has already been decided (status: {})",
            E::ENTITY_TYPE.to_lowercase(),
            status
        ))
    }
}
