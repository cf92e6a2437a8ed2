//! Errors raised while talking to the completion service.
//!
//! Every variant is an upstream failure from the caller's point of view. The
//! HTTP layer collapses them all into a single `{"error": ...}` envelope, so
//! the `Display` text is what clients see.

use reqwest::StatusCode;
use thiserror::Error;

/// A failed completion call.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Transport failure: connect, timeout, or reading the body.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("completion API HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The service answered 2xx but reported an error object.
    #[error("completion API error: {0}")]
    Api(String),

    /// The body was not a chat completion.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The completion carried no text content.
    #[error("completion returned no content")]
    EmptyResponse,
}
