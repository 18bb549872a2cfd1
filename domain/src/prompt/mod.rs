//! Prompt domain
//!
//! Personas and prompt builders for every role of the research pipeline.

mod template;

pub use template::PromptTemplate;
