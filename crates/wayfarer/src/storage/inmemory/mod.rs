//! In-memory content backend.
//!
//! Holds SEO records, packages and blog posts in `Arc<RwLock<_>>` collections.
//! Used by tests and, through `--content-fixture`, to run the site from a JSON
//! file without the hosted database.
//!
//! # Example
//!
//! ```rust,ignore
//! use wayfarer::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::load(Path::new("fixtures/content.json"))?;
//! ```

mod repository;

pub use repository::{ContentFixture, InMemoryRepository};
