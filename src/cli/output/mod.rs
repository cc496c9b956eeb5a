//! CLI output formatting module
//!
//! Provides table formatters and progress spinners for terminal display.

pub mod progress;
pub mod table;

pub use progress::{create_spinner, ProgressBarExt};
pub use table::TableFormatter;
