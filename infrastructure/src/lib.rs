//! Infrastructure layer for co-scientist
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;
pub mod results;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FilePipelineConfig, FileReasoningConfig,
};
pub use logging::JsonlConversationLogger;
pub use openai::{OpenAiError, OpenAiGateway, RetryPolicy};
pub use results::JsonFileResultSink;
