//! docoutline - outline of documentation comments
//!
//! This crate builds a navigable tree of the `/** ... */` comments sitting
//! above the declarations of a source file, implementing the Elm
//! Architecture pattern for refreshes and expansion state.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod fs_watcher;
pub mod messages;
pub mod model;
pub mod outline;
pub mod symbols;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::OutlineConfig;
pub use messages::Msg;
pub use model::OutlineModel;
