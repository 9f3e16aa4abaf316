//! Orchestration services around the graph pipeline.
//!
//! Services resolve their dependencies from the application context via the
//! `FromContext` derive; shared mutable state lives in the injected
//! collaborators (store, cache), never in the service values themselves.

mod cache;
mod explorer;

pub use cache::{CacheKey, CurrentGraph, GraphCache};
pub use explorer::ExplorerService;
