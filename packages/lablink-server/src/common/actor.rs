//! The authenticated caller as seen by the core.
//!
//! Authentication and role resolution happen at the boundary; the core only
//! receives the result. Permission hooks read roles and attributes from the
//! `Actor`, never from the database.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Roles in the lab's RBAC model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Secretary,
    Treasurer,
    ResearchCoord,
    DivisionHead,
    TechOps,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Secretary => "SECRETARY",
            Role::Treasurer => "TREASURER",
            Role::ResearchCoord => "RESEARCH_COORD",
            Role::DivisionHead => "DIVISION_HEAD",
            Role::TechOps => "TECH_OPS",
            Role::Assistant => "ASSISTANT",
        }
    }
}

/// An already-authenticated caller identity with its resolved roles.
#[derive(Debug, Clone)]
pub struct Actor {
    pub username: String,
    pub roles: HashSet<Role>,
    /// Division attribute for DIVISION_HEAD scoped checks (e.g. "BIG_DATA").
    pub expert_division: Option<String>,
}

impl Actor {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            roles: HashSet::new(),
            expert_division: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    pub fn with_expert_division(mut self, division: impl Into<String>) -> Self {
        self.expert_division = Some(division.into());
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
