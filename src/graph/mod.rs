pub mod executor;
pub mod queries;

pub use executor::*;
pub use queries::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Failed to start query runtime: {0}")]
    Runtime(String),

    #[error("Cannot connect to graph at {uri}: {reason}")]
    Connection { uri: String, reason: String },

    #[error("Query '{name}' failed: {reason}")]
    Query { name: &'static str, reason: String },

    #[error("Unexpected row shape from '{name}': {reason}")]
    Deserialize { name: &'static str, reason: String },

    #[error("No canned rows registered for query '{0}'")]
    UnexpectedQuery(&'static str),
}
