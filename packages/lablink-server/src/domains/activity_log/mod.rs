//! Append-only record of who did what to which entity, when.

pub mod models;
pub mod sink;

pub use models::ActivityLog;
pub use sink::{AuditEvent, AuditSink};
