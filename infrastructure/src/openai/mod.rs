//! OpenAI-compatible chat completions adapter
//!
//! Implements the [`ReasoningGateway`](coscientist_application::ReasoningGateway)
//! port over HTTP. Any server speaking the `/chat/completions` protocol works,
//! selected by `[reasoning] base_url`.

pub mod error;
pub mod gateway;
pub mod protocol;

pub use error::OpenAiError;
pub use gateway::{OpenAiGateway, RetryPolicy};
