//! Content backends implemented in this crate.
//!
//! The hosted database client lives in `wayfarer_client`; this module adds
//! the in-memory backend used for tests and local fixtures.

pub mod inmemory;

pub use inmemory::InMemoryRepository;
