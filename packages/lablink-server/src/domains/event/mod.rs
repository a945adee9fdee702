//! Lab events: the second approvable entity type. Events use the default
//! permission hook; the boundary's coarse role check is sufficient.

pub mod approval;
pub mod data;
pub mod models;

pub use data::EventData;
pub use models::Event;
