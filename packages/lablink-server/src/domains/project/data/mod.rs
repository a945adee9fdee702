use serde::{Deserialize, Serialize};

use crate::domains::project::models::Project;

/// Boundary-friendly representation of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectData {
    pub id: String,
    pub project_code: String,
    pub name: String,
    pub division: String,
    pub activity_type: String,
    pub status: String,
    pub description: Option<String>,
    pub progress_percent: i32,
    pub period_id: Option<String>,
    pub approval_status: String,
    pub rejection_reason: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Project> for ProjectData {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.to_string(),
            project_code: project.project_code,
            name: project.name,
            division: project.division,
            activity_type: project.activity_type,
            status: project.status,
            description: project.description,
            progress_percent: project.progress_percent,
            period_id: project.period_id.map(|id| id.to_string()),
            approval_status: project.approval_status,
            rejection_reason: project.rejection_reason,
            approved_by: project.approved_by,
            approved_at: project.approved_at.map(|d| d.to_string()),
            created_at: project.created_at.to_rfc3339(),
            updated_at: project.updated_at.to_rfc3339(),
        }
    }
}
