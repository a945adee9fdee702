//! Approval workflow binding for projects.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::{Actor, DomainError, ProjectId, Role};
use crate::domains::approval::{Approvable, ApprovalPermission};

use super::models::Project;

#[async_trait]
impl Approvable for Project {
    const ENTITY_TYPE: &'static str = "PROJECT";

    type Id = ProjectId;

    fn id(&self) -> ProjectId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn approval_status(&self) -> &str {
        &self.approval_status
    }

    async fn find_by_id(id: ProjectId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        Project::find_by_id(id, pool).await
    }

    async fn find_pending(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE approval_status = 'PENDING' ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    async fn record_approval(
        id: ProjectId,
        approved_by: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
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
        id: ProjectId,
        rejected_by: &str,
        reason: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
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

/// Division-scoped RBAC for project approval.
///
/// ADMIN and RESEARCH_COORD approve any project; DIVISION_HEAD only
/// projects in their own division (trimmed, case-insensitive compare).
pub struct DivisionApprovalPermission;

impl ApprovalPermission<Project> for DivisionApprovalPermission {
    fn check(&self, project: &Project, actor: &Actor) -> Result<(), DomainError> {
        if actor.has_role(Role::Admin) || actor.has_role(Role::ResearchCoord) {
            return Ok(());
        }

        if actor.has_role(Role::DivisionHead) {
            let project_division = project.division.trim();
            let actor_division = actor.expert_division.as_deref().unwrap_or("").trim();

            if !project_division.eq_ignore_ascii_case(actor_division) {
                return Err(DomainError::Forbidden(format!(
                    "you may only approve projects in your own division ({})",
                    actor_division
                )));
            }
            return Ok(());
        }

        Err(DomainError::Forbidden(
            "you are not authorized to approve this project".to_string(),
        ))
    }
}
