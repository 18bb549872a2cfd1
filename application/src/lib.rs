//! Application layer for co-scientist
//!
//! This crate contains the role executors, the research pipeline use case,
//! port definitions and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{PipelineParams, RoleSettings};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    feedback::{FeedbackProvider, FixedFeedback, NoFeedback},
    literature::{LiteratureError, LiteratureSource},
    progress::{NoProgress, ProgressNotifier},
    reasoning_gateway::{GatewayError, ReasoningGateway, ReasoningRequest},
    result_sink::{ResultSink, ResultSinkError},
};
pub use use_cases::roles::RoleError;
pub use use_cases::run_pipeline::{
    BundleConfiguration, BundleHypotheses, BundleMeta, PipelineFailure, PipelineOutput,
    ResultBundle, RunPipelineError, RunPipelineInput, RunPipelineUseCase,
};
