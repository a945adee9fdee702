// Common types and utilities shared across the application

pub mod actor;
pub mod entity_ids;
pub mod errors;
pub mod id;

pub use actor::{Actor, Role};
pub use entity_ids::*;
pub use errors::DomainError;
pub use id::{Id, V4, V7};
