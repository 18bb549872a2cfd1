//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod roles;
pub mod run_pipeline;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod testing;
