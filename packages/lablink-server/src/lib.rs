// LabLink - research lab administration core
//
// Approval workflow engine and academic-period lifecycle for the lab's
// administrative records (members, projects, events, letters, finance,
// archives). The HTTP boundary lives downstream; this crate owns the
// domain rules and persistence.

pub mod common;
pub mod config;
pub mod domains;

pub use config::Config;
