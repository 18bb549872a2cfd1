//! Pipeline state machine driven by the Orchestrator.

pub mod state;

pub use state::{PipelineState, Stage};
