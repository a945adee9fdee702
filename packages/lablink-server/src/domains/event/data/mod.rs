use serde::{Deserialize, Serialize};

use crate::domains::event::models::Event;

/// Boundary-friendly representation of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    pub id: String,
    pub event_code: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub period_id: Option<String>,
    pub approval_status: String,
    pub rejection_reason: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Event> for EventData {
    fn from(event: Event) -> Self {
        Self {
            id: event.id.to_string(),
            event_code: event.event_code,
            name: event.name,
            description: event.description,
            start_date: event.start_date.to_string(),
            end_date: event.end_date.to_string(),
            status: event.status,
            period_id: event.period_id.map(|id| id.to_string()),
            approval_status: event.approval_status,
            rejection_reason: event.rejection_reason,
            approved_by: event.approved_by,
            approved_at: event.approved_at.map(|d| d.to_string()),
            created_at: event.created_at.to_rfc3339(),
            updated_at: event.updated_at.to_rfc3339(),
        }
    }
}
