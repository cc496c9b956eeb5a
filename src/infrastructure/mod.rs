//! Infrastructure layer module
//!
//! This module contains the adapters behind the domain ports:
//! - HTTP transport, sliding-window rate limiting and retry
//! - Streaming bulk data decoding
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod bulk;
pub mod config;
pub mod http;
pub mod logging;
