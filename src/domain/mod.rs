//! Domain layer for the Scryfall client
//!
//! API data types and the port traits the service layer depends on.

pub mod models;
pub mod ports;
