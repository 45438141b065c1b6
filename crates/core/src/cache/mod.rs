//! SQLite-backed cache for response bodies.
//!
//! This module provides persistent, fingerprint-keyed storage using SQLite
//! with async access via tokio-rusqlite. It supports:
//!
//! - MD5 fingerprints derived from request URL and form parameters
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Unconditional last-write-wins overwrites
//!
//! There is no eviction and no expiry: an entry lives until another write
//! to the same fingerprint replaces it.

pub mod connection;
pub mod entries;
pub mod fingerprint;
pub mod migrations;

pub use crate::Error;

pub use connection::CacheStore;
pub use fingerprint::fingerprint;
