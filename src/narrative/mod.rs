pub mod report;
pub mod prompt;
pub mod gemini;

pub use report::*;
pub use prompt::*;
pub use gemini::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarrativeError {
    #[error("Text generation service unreachable at {0}")]
    Connection(String),

    #[error("Text generation service returned error (status {status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Text generation returned no text")]
    EmptyCompletion,
}
