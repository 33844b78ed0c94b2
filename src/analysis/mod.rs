pub mod types;
pub mod frequency;
pub mod aggregator;

pub use types::*;
pub use frequency::*;
pub use aggregator::*;
