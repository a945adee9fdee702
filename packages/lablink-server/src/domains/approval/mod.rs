//! Generic approval workflow shared by every approvable entity type.
//!
//! The engine is written once and bound per entity type through the
//! [`Approvable`] contract plus an injected [`ApprovalPermission`] strategy.

pub mod engine;
pub mod permission;
pub mod status;

pub use engine::{Approvable, ApprovalEngine};
pub use permission::{AllowAll, ApprovalPermission};
pub use status::ApprovalStatus;
