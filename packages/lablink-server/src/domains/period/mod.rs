//! Academic periods and their lifecycle.
//!
//! Exactly one period is active at a time. Closing a period rolls
//! continuing members forward and freezes the rest; deleting one cascades
//! across every period-scoped record.

pub mod data;
pub mod lifecycle;
pub mod models;

pub use data::PeriodData;
pub use lifecycle::{PeriodLifecycle, UpdatePeriod};
pub use models::AcademicPeriod;
