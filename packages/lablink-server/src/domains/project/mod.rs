//! Research projects: the first approvable entity type.

pub mod approval;
pub mod data;
pub mod models;

pub use approval::DivisionApprovalPermission;
pub use data::ProjectData;
pub use models::Project;
