//! Progress reporting for research runs

pub mod reporter;
