//! Namespaced attribute store over a flat parameter store.

mod namespaces;

pub use namespaces::{AttributeStore, DEFAULT_NAMESPACE};
pub use param_store::ParameterStore;
