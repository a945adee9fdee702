use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domains::event::models::Event;
use crate::domains::member::models::MemberPeriod;
use crate::domains::period::models::AcademicPeriod;
use crate::domains::project::models::Project;

/// Boundary-friendly representation of a period, including headline counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodData {
    pub id: String,
    pub code: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
    pub is_archived: bool,
    pub total_members: i64,
    pub total_projects: i64,
    pub total_events: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl PeriodData {
    pub async fn load(period: AcademicPeriod, pool: &PgPool) -> Result<Self, sqlx::Error> {
        let total_members = MemberPeriod::count_by_period(period.id, pool).await?;
        let total_projects = Project::count_by_period(period.id, pool).await?;
        let total_events = Event::count_by_period(period.id, pool).await?;

        Ok(Self {
            id: period.id.to_string(),
            code: period.code,
            name: period.name,
            start_date: period.start_date.to_string(),
            end_date: period.end_date.to_string(),
            is_active: period.is_active,
            is_archived: period.is_archived,
            total_members,
            total_projects,
            total_events,
            created_at: period.created_at.to_rfc3339(),
            updated_at: period.updated_at.to_rfc3339(),
        })
    }
}
