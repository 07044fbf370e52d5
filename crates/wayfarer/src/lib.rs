//! Wayfarer site server.
//!
//! Server-renders the travel site by executing the pre-built render entry on
//! an SSR worker pool, with page content fetched from the hosted database.
//! The same [`pipeline::RenderPipeline`] backs the HTTP server (`wayfarer`)
//! and the static pre-renderer (`wayfarer-prerender`).

pub mod app;
pub mod config;
pub mod handlers;
pub mod pipeline;
pub mod prerender;
pub mod resolver;
pub mod site;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod template;

#[cfg(test)]
mod testing;
