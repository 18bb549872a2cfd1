//! Configuration file loading for co-scientist
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `COSCIENTIST_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./coscientist.toml` or `./.coscientist.toml`
//! 4. Global: `$XDG_CONFIG_HOME/co-scientist/config.toml`
//! 5. Default values
//!
//! CLI flags are applied on top by the binary.

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    FileConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat, FilePipelineConfig,
    FileReasoningConfig,
};
pub use loader::ConfigLoader;
