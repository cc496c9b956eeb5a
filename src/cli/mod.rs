//! Command-line interface
//!
//! `clap` definitions live in [`types`], handlers in [`commands`] and
//! terminal formatting in [`output`].

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use crate::services::ClientError;

/// Print `err` to stderr, as JSON when `json` is set
pub fn handle_error(err: &anyhow::Error, json: bool) {
    let transient = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ClientError>())
        .is_some_and(ClientError::is_transient);

    if json {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": causes,
            "transient": transient,
        });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err:#}");
        if transient {
            eprintln!("This looks temporary; try again shortly.");
        }
    }
}
