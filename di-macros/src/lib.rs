//! Compile-time dependency injection macros for ipgraph.
//!
//! Two derives work together:
//! - `#[derive(Context)]` makes each field of the application context
//!   extractable through the `FromRef` trait
//! - `#[derive(FromContext)]` builds a struct by resolving every field
//!   from the context
//!
//! The `FromRef` trait itself lives in the consuming crate; generated code
//! references it as `crate::FromRef`.

use proc_macro::TokenStream;

mod context;
mod from_context;

/// Derive macro for the dependency injection context.
///
/// Generates a `FromRef` implementation for each field type so the field
/// can be extracted from a context reference by clone.
///
/// # Requirements
///
/// - All fields must implement `Clone`
/// - The struct itself should derive `Clone`
///
/// # Example
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct Context {
///     pub source: Arc<dyn RelationshipSource>,
///     pub store: ViewStateStore,
///     pub config: Arc<Config>,
/// }
///
/// // Generated:
/// // impl FromRef<Context> for Arc<dyn RelationshipSource> { ... }
/// // impl FromRef<Context> for ViewStateStore { ... }
/// // impl FromRef<Context> for Arc<Config> { ... }
/// ```
#[proc_macro_derive(Context)]
pub fn derive_context(input: TokenStream) -> TokenStream {
    context::derive_context_impl(input)
}

/// Derive macro for types assembled from the context.
///
/// Generates `FromRef<Context>` for the annotated struct by resolving each
/// field with `FromRef::from_ref` on the context. The context type is the
/// crate's `Context`.
///
/// # Example
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// pub struct ExplorerService {
///     source: Arc<dyn RelationshipSource>, // resolved via FromRef<Context>
///     store: ViewStateStore,               // resolved via FromRef<Context>
/// }
///
/// let service = ExplorerService::from_ref(&ctx);
/// ```
#[proc_macro_derive(FromContext)]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    from_context::derive_from_context_impl(input)
}
