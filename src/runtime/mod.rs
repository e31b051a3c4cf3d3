//! Runtime module - drives the update loop for the command line
//!
//! - `app` - message pump, symbol workers and the watch loop

pub mod app;

pub use app::App;
