//! wayfarer_client - client for the hosted content database.
//!
//! The database exposes its tables through a PostgREST HTTP API
//! (`/rest/v1/<table>?<column>=eq.<value>`). [`SupabaseClient`] wraps the
//! handful of queries the site needs and implements
//! [`wayfarer_core::storage::ContentRepository`].

pub mod client;
pub mod error;

pub use client::{SupabaseClient, BLOG_POSTS_TABLE, PACKAGES_TABLE, SEO_TABLE};
pub use error::{ClientError, Result};
