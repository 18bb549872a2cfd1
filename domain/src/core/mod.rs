//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: text-generation model identifiers
//! - [`goal::ResearchGoal`]: the research goal a run pursues
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod goal;
pub mod model;
pub mod string;
