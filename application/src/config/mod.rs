//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`PipelineParams`]: stage sizes, thresholds, iteration and failure policy
//! - [`RoleSettings`]: model, per-role temperatures and token limit for reasoning calls

pub mod pipeline_params;
pub mod role_settings;

pub use pipeline_params::PipelineParams;
pub use role_settings::RoleSettings;
