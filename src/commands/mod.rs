//! CLI command implementations.
//!
//! - **analyze**: audit a module dependency listing and report modularity metrics
//! - **init**: write a default `.modmap.toml`

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
