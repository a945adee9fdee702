pub mod member;
pub mod member_period;

pub use member::*;
pub use member_period::*;
