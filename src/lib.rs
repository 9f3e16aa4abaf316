//! ipgraph - IP Asset Relationship Graph Engine
//!
//! Turns a raw relationship payload into a typed graph model, filters and
//! searches it, computes shortest paths and neighborhoods, and derives the
//! highlight state a renderer consumes. Fetching, caching and view-state
//! synchronization are orchestrated around a dependency-injected context;
//! rendering and transport live in the host application.

pub mod config;
pub mod context;
pub mod debounce;
pub mod di;
pub mod display;
pub mod error;
pub mod graph;
pub mod models;
pub mod services;
pub mod source;
pub mod store;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
