//! Pure domain logic for the wayfarer site.
//!
//! - [`page`]: content records, route classification, the page payload,
//!   head generation and HTML composition
//! - [`storage`]: the content repository trait and its errors
//!
//! Nothing in this crate performs I/O; implementations of
//! [`storage::ContentRepository`] live in the shell crates.

pub mod page;
pub mod storage;
