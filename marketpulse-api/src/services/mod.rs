//! Model-backed generators
//!
//! Each generator wraps one model invocation: build the prompt pair, request
//! structured-JSON output, parse the completion into its typed result. No
//! persistence and no internal retry; a single upstream failure is a single
//! caller-visible failure.

use thiserror::Error;

pub mod analysis;
pub mod brand;
pub mod model_client;

pub use model_client::{ModelClient, ModelError, OpenAiClient};

/// Generator failure: the upstream call errored, or the completion did not
/// match the expected shape. Malformed payloads never reach storage.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("model request failed: {0}")]
    Upstream(#[from] ModelError),

    #[error("model returned malformed payload: {0}")]
    Malformed(String),
}
