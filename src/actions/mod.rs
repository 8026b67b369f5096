//! Action dispatch: catalog of compiled-in functions, registry keyed by
//! configured action ids, and the stock builtin actions.

pub mod builtin;
mod catalog;
mod registry;

pub use catalog::{ActionCatalog, ActionFn, ActionFuture};
pub use registry::{ActionRegistry, KIND_EXECUTION_ERROR, KIND_NOT_FOUND};
