//! Storage-facing core for httpstash.
//!
//! This crate provides:
//! - Persistent response-body cache with a SQLite backend
//! - Request fingerprinting for cache keys
//! - Layered configuration
//! - Unified error types

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStore, fingerprint};
pub use config::AppConfig;
pub use error::Error;
