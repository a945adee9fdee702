//! Lab members (research assistants) and their per-period membership.

pub mod data;
pub mod models;

pub use data::MemberPeriodData;
pub use models::{MemberPeriod, MemberPeriodStatus, ResearchAssistant};
