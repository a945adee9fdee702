//! Document archives produced by projects and events.

pub mod models;

pub use models::Archive;
