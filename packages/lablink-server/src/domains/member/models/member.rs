use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::MemberId;

/// A lab member. Roles live with the identity provider at the boundary;
/// the core only keeps the profile fields it needs for domain rules.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResearchAssistant {
    pub id: MemberId,
    pub username: String,
    pub full_name: String,
    pub expert_division: String, // BIG_DATA, CYBER_SECURITY, GAME_TECH, GIS
    pub department: String,      // INTERNAL or EXTERNAL
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl ResearchAssistant {
    pub async fn find_by_id(id: MemberId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ResearchAssistant>("SELECT * FROM research_assistants WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        username: &str,
        full_name: &str,
        expert_division: &str,
        department: &str,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ResearchAssistant>(
            r#"
            INSERT INTO research_assistants (id, username, full_name, expert_division, department)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(MemberId::new())
        .bind(username)
        .bind(full_name)
        .bind(expert_division)
        .bind(department)
        .fetch_one(pool)
        .await
    }
}
