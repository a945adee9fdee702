//! Typed ID aliases for all domain entities.

pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for ResearchAssistant entities (lab members).
pub struct Member;

/// Marker type for AcademicPeriod entities.
pub struct Period;

/// Marker type for Project entities.
pub struct ProjectEntity;

/// Marker type for Event entities.
pub struct EventEntity;

/// Marker type for Letter entities.
pub struct LetterEntity;

/// Marker type for FinanceTransaction entities.
pub struct Transaction;

/// Marker type for Archive entities.
pub struct ArchiveEntity;

/// Marker type for ActivityLog entities.
pub struct LogEntry;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type MemberId = Id<Member>;
pub type PeriodId = Id<Period>;
pub type ProjectId = Id<ProjectEntity>;
pub type EventId = Id<EventEntity>;
pub type LetterId = Id<LetterEntity>;
pub type TransactionId = Id<Transaction>;
pub type ArchiveId = Id<ArchiveEntity>;
pub type ActivityLogId = Id<LogEntry>;
