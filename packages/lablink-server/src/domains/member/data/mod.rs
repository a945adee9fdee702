use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domains::member::models::{MemberPeriod, ResearchAssistant};

/// Boundary-friendly representation of a member's standing in one period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberPeriodData {
    pub member_id: String,
    pub member_name: String,
    pub member_username: String,
    pub period_id: String,
    pub status: String,
    pub position: Option<String>,
    pub joined_at: String,
    pub graduated_at: Option<String>,
}

impl MemberPeriodData {
    /// Join the association with the member profile it points at.
    pub async fn load(mp: MemberPeriod, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        let Some(member) = ResearchAssistant::find_by_id(mp.member_id, pool).await? else {
            return Ok(None);
        };

        Ok(Some(Self {
            member_id: mp.member_id.to_string(),
            member_name: member.full_name,
            member_username: member.username,
            period_id: mp.period_id.to_string(),
            status: mp.status,
            position: mp.position,
            joined_at: mp.joined_at.to_rfc3339(),
            graduated_at: mp.graduated_at.map(|t| t.to_rfc3339()),
        }))
    }
}
