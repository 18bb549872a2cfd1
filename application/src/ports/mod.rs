//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod conversation_logger;
pub mod feedback;
pub mod literature;
pub mod progress;
pub mod reasoning_gateway;
pub mod result_sink;
