pub mod letter;

pub use letter::*;
