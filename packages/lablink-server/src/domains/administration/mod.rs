//! Administrative correspondence (outgoing letters).

pub mod models;

pub use models::Letter;
