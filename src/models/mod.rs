pub mod case;
pub mod interaction;

pub use case::*;
pub use interaction::*;
