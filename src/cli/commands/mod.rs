//! CLI command handlers
//!
//! Each handler takes the shared client, performs its requests and prints
//! either a table or JSON.

pub mod bulk;
pub mod card;
pub mod rulings;
